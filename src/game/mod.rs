//! Game engine: room graph, world state, command routing and the grue.
//!
//! A [`Game`] owns one player's [`WorldState`] and shares the immutable
//! [`WorldDefinition`] through an `Arc`, so sessions stay isolated while the
//! rooms are loaded once per process.

pub mod commands;
pub mod errors;
pub mod hazard;
pub mod responder;
pub mod seed_loader;
pub mod state;
pub mod types;
pub mod world;

pub use commands::{Command, Game, GameSettings};
pub use errors::GameError;
pub use hazard::{GrueHazard, HazardEffect, HazardState, GRUE_DEATH, GRUE_WARNING};
pub use responder::{EchoResponder, Phrasebook, Responder};
pub use seed_loader::{canonical_world, load_world_from_json, CANONICAL_START_ROOM};
pub use state::{OutputBuffer, WorldState, DEFAULT_GRUE_COUNTDOWN};
pub use types::{Direction, Location, ObjectId, ObjectPlacement, RoomId, RoomRecord};
pub use world::{RoomGraph, WorldDefinition};
