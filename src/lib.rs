//! # Venture - Realms of Venture text adventure server
//!
//! Venture serves a small single-player text adventure over a plain TCP text
//! protocol. A client connects, is greeted with a description of the starting
//! room, and then sends one command per turn (`move north`, `get candle`,
//! `say hello`, ...). Each turn gets exactly one reply, prefixed with `OK! `.
//!
//! ## Features
//!
//! - **Room Graph**: rooms with directional exits, validated at load time.
//! - **Inventory**: pick up and drop objects; a candle keeps dark rooms safe.
//! - **The Grue**: linger in an unlit dark room too long and the session ends.
//! - **Say Responder**: optional keyword phrasebook; falls back to an echo.
//! - **Data-Driven Worlds**: rooms and objects may be loaded from JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use venture::config::Config;
//! use venture::server::GameServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let server = GameServer::new(config)?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - room graph, world state, command routing, darkness hazard
//! - [`server`] - session loop, TCP bootstrap and the interactive client
//! - [`config`] - TOML configuration
//! - [`logutil`] - single-line log escaping for player input
//! - [`metrics`] - process-wide session and turn counters
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   GameServer    │ ← accept loop, one client at a time
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Session      │ ← greet, then read → route → reply
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │      Game       │ ← commands, world state, grue
//! └─────────────────┘
//! ```

pub mod config;
pub mod game;
pub mod logutil;
pub mod metrics;
pub mod server;
