//! Darkness hazard: lingering in an unlit dark room feeds you to a grue.
//!
//! Evaluated once after every turn that did not end the session. Safe turns
//! reset the countdown; endangered turns warn near the end and kill at zero.

use log::{debug, warn};

use crate::game::state::{OutputBuffer, WorldState, DEFAULT_GRUE_COUNTDOWN};
use crate::game::world::RoomGraph;
use crate::game::GameError;

pub const GRUE_WARNING: &str =
    "It is pitch black. You hear something slithering in the dark nearby...";
pub const GRUE_DEATH: &str =
    "Oh no! A lurking grue slithers out of the darkness and devours you. Goodbye!";

/// Default countdown value at or below which the warning is shown.
pub const DEFAULT_WARNING_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardState {
    /// Lit room, or dark room with the light source burning.
    Safe,
    /// Dark room without light; `remaining` is the current countdown.
    Endangered { remaining: u32 },
}

/// What one evaluation did to the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardEffect {
    Reset,
    Tick { warned: bool },
    Eaten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrueHazard {
    limit: u32,
    warn_at: u32,
}

impl Default for GrueHazard {
    fn default() -> Self {
        Self::new(DEFAULT_GRUE_COUNTDOWN, DEFAULT_WARNING_THRESHOLD)
    }
}

impl GrueHazard {
    pub fn new(limit: u32, warn_at: u32) -> Self {
        Self { limit, warn_at }
    }

    /// The value the countdown is reset to while safe.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn assess(&self, graph: &RoomGraph, state: &WorldState) -> Result<HazardState, GameError> {
        let room = graph.room(&state.current_room)?;
        if room.dark && !state.lit {
            Ok(HazardState::Endangered {
                remaining: state.countdown,
            })
        } else {
            Ok(HazardState::Safe)
        }
    }

    pub fn evaluate(
        &self,
        graph: &RoomGraph,
        state: &mut WorldState,
        out: &mut OutputBuffer,
    ) -> Result<HazardEffect, GameError> {
        match self.assess(graph, state)? {
            HazardState::Safe => {
                state.countdown = self.limit;
                Ok(HazardEffect::Reset)
            }
            HazardState::Endangered { remaining } => {
                let warned = remaining <= self.warn_at;
                if warned {
                    out.push_line(GRUE_WARNING);
                }
                if remaining == 0 {
                    warn!("Grue struck in room {}", state.current_room);
                    out.overwrite(GRUE_DEATH);
                    state.done = true;
                    return Ok(HazardEffect::Eaten);
                }
                state.countdown = remaining - 1;
                debug!("Grue countdown now {}", state.countdown);
                Ok(HazardEffect::Tick { warned })
            }
        }
    }
}
