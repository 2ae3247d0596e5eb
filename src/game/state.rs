//! Mutable per-session game state and the per-turn output buffer.

use std::collections::BTreeMap;

use crate::game::types::{Location, ObjectId, RoomId};
use crate::game::world::WorldDefinition;

/// Turns a player may spend in unlit darkness before the grue strikes.
pub const DEFAULT_GRUE_COUNTDOWN: u32 = 4;

/// Everything that changes while a session plays. One per connection; never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub current_room: RoomId,
    pub objects: BTreeMap<ObjectId, Location>,
    pub light_source: ObjectId,
    pub lit: bool,
    pub countdown: u32,
    pub done: bool,
}

impl WorldState {
    /// Fresh state with every object in its starting room.
    pub fn new(world: &WorldDefinition, start_room: &str) -> Self {
        let objects = world
            .objects
            .iter()
            .map(|placement| (placement.id.clone(), Location::Room(placement.room.clone())))
            .collect();

        Self {
            current_room: start_room.to_string(),
            objects,
            light_source: world.light_source.clone(),
            lit: false,
            countdown: DEFAULT_GRUE_COUNTDOWN,
            done: false,
        }
    }

    /// Ids of objects lying in `room_id`, in id order.
    pub fn objects_in(&self, room_id: &str) -> Vec<&str> {
        self.objects
            .iter()
            .filter(|(_, loc)| matches!(loc, Location::Room(r) if r == room_id))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Ids of objects the player carries, in id order.
    pub fn carried(&self) -> Vec<&str> {
        self.objects
            .iter()
            .filter(|(_, loc)| **loc == Location::Carried)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn location_of(&self, object_id: &str) -> Option<&Location> {
        self.objects.get(object_id)
    }

    pub fn is_carried(&self, object_id: &str) -> bool {
        self.location_of(object_id) == Some(&Location::Carried)
    }

    /// Resolve a player-typed name to a tracked object id, ignoring case.
    pub fn resolve_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .keys()
            .find(|id| id.eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn is_light_source(&self, object_id: &str) -> bool {
        self.light_source.eq_ignore_ascii_case(object_id)
    }

    pub fn relocate(&mut self, object_id: &str, location: Location) {
        if let Some(slot) = self.objects.get_mut(object_id) {
            *slot = location;
        }
    }
}

/// Response text accumulated during one turn.
///
/// Cleared at the start of every turn and flushed once at the end. Handlers
/// append; only the greeting and terminal messages overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append `line`, separated from earlier content by a line break.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn overwrite(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Hand the turn's text to the transport and leave the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::seed_loader::canonical_world;

    #[test]
    fn new_state_places_objects_in_start_rooms() {
        let world = canonical_world();
        let state = WorldState::new(&world, "0");
        assert_eq!(state.current_room, "0");
        assert_eq!(state.countdown, DEFAULT_GRUE_COUNTDOWN);
        assert!(!state.lit);
        assert!(!state.done);
        assert_eq!(state.objects_in("2"), vec!["candle"]);
        assert!(state.carried().is_empty());
    }

    #[test]
    fn resolve_object_ignores_case() {
        let world = canonical_world();
        let state = WorldState::new(&world, "0");
        assert_eq!(state.resolve_object("CaNdLe").as_deref(), Some("candle"));
        assert_eq!(state.resolve_object("lamp"), None);
    }

    #[test]
    fn output_buffer_joins_lines_and_takes() {
        let mut out = OutputBuffer::new();
        out.push_line("one");
        out.push_line("two");
        assert_eq!(out.as_str(), "one\ntwo");
        out.overwrite("final");
        assert_eq!(out.take(), "final");
        assert!(out.is_empty());
    }
}
