//! World seed data: the built-in world and the JSON world-file loader.
//!
//! A world file lets an operator swap in different rooms without recompiling:
//!
//! ```json
//! {
//!   "light_source": "candle",
//!   "rooms": [
//!     { "id": "0", "name": "The Foyer", "description": "a grand foyer, all pink.",
//!       "exits": { "north": "3" } },
//!     { "id": "3", "name": "The Fountain", "description": "a grand fountain.",
//!       "dark": true, "exits": { "south": "0" } }
//!   ],
//!   "objects": [ { "id": "candle", "room": "3" } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::game::types::{Direction, ObjectPlacement, RoomRecord};
use crate::game::world::{RoomGraph, WorldDefinition};
use crate::game::GameError;

/// Room a fresh session starts in for the built-in world.
pub const CANONICAL_START_ROOM: &str = "0";

/// The light source of the built-in world.
pub const CANONICAL_LIGHT_SOURCE: &str = "candle";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorldSeed {
    light_source: String,
    rooms: Vec<RoomRecord>,
    #[serde(default)]
    objects: Vec<ObjectPlacement>,
}

/// The four-room house: Foyer in the middle, Kitchen (dark) to the west,
/// Library to the east, Fountain to the north.
pub fn canonical_world() -> WorldDefinition {
    let objects = vec![
        ObjectPlacement::new(CANONICAL_LIGHT_SOURCE, "2"),
        ObjectPlacement::new("spoon", "1"),
        ObjectPlacement::new("coin", "3"),
    ];
    WorldDefinition {
        graph: RoomGraph::from_trusted(canonical_rooms()),
        objects,
        light_source: CANONICAL_LIGHT_SOURCE.to_string(),
    }
}

fn canonical_rooms() -> Vec<RoomRecord> {
    vec![
        RoomRecord::new("0", "The Foyer", "a grand foyer, all pink.")
            .with_exit(Direction::North, "3")
            .with_exit(Direction::East, "2")
            .with_exit(Direction::West, "1"),
        RoomRecord::new("1", "The Kitchen", "a large kitchen, dirty and gray.")
            .with_exit(Direction::East, "0")
            .dark(),
        RoomRecord::new("2", "The Library", "a musty library, with wooden floors.")
            .with_exit(Direction::West, "0"),
        RoomRecord::new("3", "The Fountain", "a grand fountain, broken and dry.")
            .with_exit(Direction::South, "0"),
    ]
}

/// Parse and validate a world document.
pub fn load_world_from_str(contents: &str, origin: &str) -> Result<WorldDefinition, GameError> {
    let seed: WorldSeed = serde_json::from_str(contents).map_err(|e| GameError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;

    let graph = RoomGraph::new(seed.rooms)?;
    WorldDefinition::new(graph, seed.objects, &seed.light_source)
}

/// Load a world from a JSON file on disk.
pub fn load_world_from_json<P: AsRef<Path>>(path: P) -> Result<WorldDefinition, GameError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    load_world_from_str(&contents, &path.display().to_string())
}

/// Serialize a world back into the JSON seed format.
pub fn world_to_json(world: &WorldDefinition) -> Result<String, GameError> {
    let seed = WorldSeed {
        light_source: world.light_source.clone(),
        rooms: world.graph.rooms().cloned().collect(),
        objects: world.objects.clone(),
    };
    serde_json::to_string_pretty(&seed).map_err(|e| GameError::Parse {
        path: "<world>".to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_world_has_four_rooms() {
        let world = canonical_world();
        assert_eq!(world.graph.len(), 4);
        assert!(world.graph.room("1").unwrap().dark);
        assert!(!world.graph.room("0").unwrap().dark);
        assert_eq!(world.light_source, "candle");
    }

    #[test]
    fn canonical_rooms_pass_validation() {
        let graph = RoomGraph::new(canonical_rooms()).unwrap();
        let world = canonical_world();
        assert_eq!(graph, world.graph);
        let checked =
            WorldDefinition::new(graph, world.objects.clone(), &world.light_source).unwrap();
        assert!(checked.check_start_room(CANONICAL_START_ROOM).is_ok());
    }

    #[test]
    fn canonical_world_reloads_from_its_own_json() {
        let world = canonical_world();
        let json = world_to_json(&world).unwrap();
        let reloaded = load_world_from_str(&json, "inline").unwrap();
        assert_eq!(reloaded, world);
    }

    #[test]
    fn dangling_exit_is_rejected_at_load() {
        let json = r#"{
            "light_source": "candle",
            "rooms": [
                { "id": "a", "name": "A", "description": "a.", "exits": { "north": "nowhere" } }
            ],
            "objects": [ { "id": "candle", "room": "a" } ]
        }"#;
        let err = load_world_from_str(json, "inline").unwrap_err();
        assert!(matches!(err, GameError::DanglingExit { .. }));
    }

    #[test]
    fn malformed_json_reports_origin() {
        let err = load_world_from_str("{ not json", "broken.json").unwrap_err();
        match err {
            GameError::Parse { path, .. } => assert_eq!(path, "broken.json"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
