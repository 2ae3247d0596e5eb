use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::game::GameError;

/// Stable room identity (e.g. `"0"`).
pub type RoomId = String;

/// Stable object identity (e.g. `"candle"`).
pub type ObjectId = String;

/// The four compass directions a room may have an exit in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Rendering order used for exit lists.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Opposite compass point, for walking a path back.
    pub fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}

/// A node of the room graph. Exits absent from the map are walls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomRecord {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub dark: bool,
    #[serde(default)]
    pub exits: BTreeMap<Direction, RoomId>,
}

impl RoomRecord {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            dark: false,
            exits: BTreeMap::new(),
        }
    }

    pub fn with_exit(mut self, direction: Direction, destination: &str) -> Self {
        self.exits.insert(direction, destination.to_string());
        self
    }

    pub fn dark(mut self) -> Self {
        self.dark = true;
        self
    }

    pub fn exit(&self, direction: Direction) -> Option<&RoomId> {
        self.exits.get(&direction)
    }
}

/// Where an object currently is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Room(RoomId),
    Carried,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Room(id) => write!(f, "room {}", id),
            Location::Carried => f.write_str("carried"),
        }
    }
}

/// Starting placement of an object in a world definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectPlacement {
    pub id: ObjectId,
    pub room: RoomId,
}

impl ObjectPlacement {
    pub fn new(id: &str, room: &str) -> Self {
        Self {
            id: id.to_string(),
            room: room.to_string(),
        }
    }
}
