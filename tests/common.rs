//! Shared helpers for the integration tests: an in-memory player that
//! talks to a session over `tokio::io::duplex`.
#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

use venture::config::Config;
use venture::server::GameServer;

pub const PREFIX: &str = "OK! ";

pub fn server() -> GameServer {
    GameServer::new(Config::default()).expect("default config builds a server")
}

pub fn server_with(config: Config) -> GameServer {
    GameServer::new(config).expect("server")
}

/// Client half of an in-memory connection.
pub struct Player {
    stream: DuplexStream,
}

impl Player {
    pub fn new(stream: DuplexStream) -> Self {
        Self { stream }
    }

    /// Next server message with the acknowledgment prefix stripped.
    /// `None` once the server has closed its side.
    pub async fn recv(&mut self) -> Option<String> {
        let mut buf = vec![0u8; 4096];
        let n = self.stream.read(&mut buf).await.expect("read");
        if n == 0 {
            return None;
        }
        let text = String::from_utf8(buf[..n].to_vec()).expect("utf8");
        assert!(
            text.starts_with(PREFIX),
            "message missing prefix: {:?}",
            text
        );
        assert!(!text.ends_with('\n'), "message has a trailing newline: {:?}", text);
        Some(text[PREFIX.len()..].to_string())
    }

    /// Send one command and wait for its single reply.
    pub async fn cmd(&mut self, line: &str) -> String {
        self.stream.write_all(line.as_bytes()).await.expect("write");
        self.stream.flush().await.expect("flush");
        self.recv().await.expect("reply")
    }

    /// Expect the server to hang up.
    pub async fn expect_closed(&mut self) {
        assert!(self.recv().await.is_none(), "expected the server to close");
    }

    pub fn hang_up(self) {
        drop(self.stream);
    }
}

pub fn connection() -> (DuplexStream, Player) {
    let (server_side, client_side) = tokio::io::duplex(4096);
    (server_side, Player::new(client_side))
}
