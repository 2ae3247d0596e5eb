//! Static room graph and world definition.
//!
//! The graph is validated once at construction (unique ids, no dangling exits)
//! and is immutable afterwards, so it can be shared between sessions behind an
//! `Arc`. Everything that changes during play lives in [`WorldState`].

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::game::state::WorldState;
use crate::game::types::{Direction, ObjectId, ObjectPlacement, RoomId, RoomRecord};
use crate::game::GameError;

/// Read-only directed graph of rooms keyed by room id.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGraph {
    rooms: BTreeMap<RoomId, RoomRecord>,
}

impl RoomGraph {
    /// Build a graph, rejecting duplicate ids and exits to undeclared rooms.
    pub fn new(rooms: Vec<RoomRecord>) -> Result<Self, GameError> {
        let mut map = BTreeMap::new();
        for room in rooms {
            if map.contains_key(&room.id) {
                return Err(GameError::DuplicateRoom(room.id));
            }
            map.insert(room.id.clone(), room);
        }

        for room in map.values() {
            for (direction, target) in &room.exits {
                if !map.contains_key(target) {
                    return Err(GameError::DanglingExit {
                        room: room.id.clone(),
                        direction: direction.to_string(),
                        target: target.clone(),
                    });
                }
            }
        }

        debug!("Room graph built with {} rooms", map.len());
        Ok(Self { rooms: map })
    }

    /// Build from rooms already known to be consistent (built-in seed data).
    pub(crate) fn from_trusted(rooms: Vec<RoomRecord>) -> Self {
        Self {
            rooms: rooms.into_iter().map(|room| (room.id.clone(), room)).collect(),
        }
    }

    /// Look up a room, reporting a missing one as an error.
    pub fn room(&self, id: &str) -> Result<&RoomRecord, GameError> {
        self.rooms
            .get(id)
            .ok_or_else(|| GameError::UnknownRoom(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomRecord> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Where the exit in `direction` from `from` leads, if anywhere.
    pub fn neighbor(&self, from: &str, direction: Direction) -> Result<Option<&RoomId>, GameError> {
        Ok(self.room(from)?.exit(direction))
    }

    /// Render a room for the player: name, darkness, description, visible
    /// objects and the available exits. Pure with respect to `state`.
    pub fn describe(&self, room_id: &str, state: &WorldState) -> Result<String, GameError> {
        let room = self.room(room_id)?;

        let mut out = format!("You are in {}.", room.name);
        if room.dark {
            if state.lit {
                out.push_str(&format!(
                    "  It is dark, but your {} casts a warm glow.",
                    state.light_source
                ));
            } else {
                out.push_str("  It is dark. You are likely to be eaten by a grue.");
            }
        } else {
            out.push_str("  It is light here.");
        }
        out.push_str(&format!("\nYou see {}", room.description));

        let objects = state.objects_in(room_id);
        if !objects.is_empty() {
            out.push_str(&format!("\nYou notice: {}", objects.join(", ")));
        }

        let exits: Vec<&str> = Direction::ALL
            .iter()
            .filter(|dir| room.exit(**dir).is_some())
            .map(Direction::as_str)
            .collect();
        out.push('\n');
        match exits.len() {
            0 => out.push_str("There are no obvious exits."),
            1 => out.push_str(&format!("A path lies to {}.", exits[0])),
            _ => out.push_str(&format!("Paths lie to {}.", exits.join(", "))),
        }

        Ok(out)
    }
}

/// A room graph plus the objects placed in it and the designated light source.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldDefinition {
    pub graph: RoomGraph,
    pub objects: Vec<ObjectPlacement>,
    pub light_source: ObjectId,
}

impl WorldDefinition {
    /// Validate object placements against the graph.
    pub fn new(
        graph: RoomGraph,
        objects: Vec<ObjectPlacement>,
        light_source: &str,
    ) -> Result<Self, GameError> {
        let mut seen = BTreeSet::new();
        for object in &objects {
            if !seen.insert(object.id.to_ascii_lowercase()) {
                return Err(GameError::DuplicateObject(object.id.clone()));
            }
            if !graph.contains(&object.room) {
                return Err(GameError::UnknownRoom(object.room.clone()));
            }
        }
        // Stored under the object's own spelling, which is what the state map is keyed by.
        let light_source = objects
            .iter()
            .find(|object| object.id.eq_ignore_ascii_case(light_source))
            .map(|object| object.id.clone())
            .ok_or_else(|| GameError::MissingLightSource(light_source.to_string()))?;

        Ok(Self {
            graph,
            objects,
            light_source,
        })
    }

    /// Fail early when the configured start room is missing.
    pub fn check_start_room(&self, start_room: &str) -> Result<(), GameError> {
        if self.graph.contains(start_room) {
            Ok(())
        } else {
            Err(GameError::UnknownStartRoom(start_room.to_string()))
        }
    }
}
