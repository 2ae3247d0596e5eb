use thiserror::Error;

/// Errors raised by the game engine, world loading, and the say responder.
#[derive(Debug, Error)]
pub enum GameError {
    /// A room id that is not part of the graph.
    #[error("no such room: {0}")]
    UnknownRoom(String),

    /// A direction token that is not one of north/south/east/west.
    #[error("no such direction: {0}")]
    UnknownDirection(String),

    /// An exit pointing at a room that was never declared.
    #[error("room {room} has a {direction} exit to unknown room {target}")]
    DanglingExit {
        room: String,
        direction: String,
        target: String,
    },

    /// Two rooms declared with the same id.
    #[error("duplicate room id: {0}")]
    DuplicateRoom(String),

    /// Two objects declared with the same id.
    #[error("duplicate object id: {0}")]
    DuplicateObject(String),

    /// The configured start room is not in the graph.
    #[error("start room {0} does not exist")]
    UnknownStartRoom(String),

    /// The declared light source is not one of the world's objects.
    #[error("light source {0} is not a declared object")]
    MissingLightSource(String),

    /// Malformed world or phrasebook JSON.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// The chat responder had nothing to say.
    #[error("responder failed: {0}")]
    Responder(String),

    /// Wrapper around IO errors (reading world files, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
