use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::ServerConfig;
use crate::game::Game;
use crate::logutil::{escape_log, preview_bytes};
use crate::metrics;

/// # Player Session
///
/// Drives one connected player through the turn loop:
///
/// 1. **Greet** - welcome text and the starting room are flushed
/// 2. **Receive** - block until the client sends something (at most
///    `max_input_bytes` per turn; longer input is cut off)
/// 3. **Route** - the [`Game`] turns the input into exactly one reply
/// 4. **Flush** - the reply goes out behind the acknowledgment prefix
///
/// Steps 2-4 repeat until the game reports it is done or the peer hangs up.
/// The stream is any duplex byte stream, so tests can use
/// `tokio::io::duplex` in place of a socket.
pub struct Session<S> {
    pub id: String,
    stream: S,
    game: Game,
    max_input_bytes: usize,
    ack_prefix: String,
    newline_framing: bool,
}

/// How a session came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The game ended (quit, grue, bad teleport) and the farewell was sent.
    Finished,
    /// The client went away first.
    Disconnected,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(id: String, stream: S, game: Game, config: &ServerConfig) -> Self {
        Self {
            id,
            stream,
            game,
            max_input_bytes: config.max_input_bytes.max(1),
            ack_prefix: config.ack_prefix.clone(),
            newline_framing: config.newline_framing,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Write one message: prefix, text, optional newline framing.
    pub async fn send(&mut self, text: &str) -> std::io::Result<()> {
        let mut wire = String::with_capacity(self.ack_prefix.len() + text.len() + 1);
        wire.push_str(&self.ack_prefix);
        wire.push_str(text);
        if self.newline_framing {
            wire.push('\n');
        }
        self.stream.write_all(wire.as_bytes()).await?;
        self.stream.flush().await
    }

    /// Block for the next chunk of input. `None` once the peer has closed.
    pub async fn receive(&mut self) -> std::io::Result<Option<String>> {
        let mut buf = vec![0u8; self.max_input_bytes];
        let n = self.stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        debug!("session={} received {}", escape_log(&self.id), preview_bytes(&buf[..n]));
        Ok(Some(String::from_utf8_lossy(&buf[..n]).into_owned()))
    }

    /// Greet, then loop turns until the game is done or the client leaves.
    pub async fn run(mut self) -> SessionEnd {
        metrics::inc_sessions_started();
        info!("session={} started", escape_log(&self.id));

        let end = self.play().await;

        if let Err(e) = self.stream.shutdown().await {
            debug!("session={} shutdown: {}", escape_log(&self.id), e);
        }
        metrics::inc_sessions_finished();
        if end == SessionEnd::Disconnected {
            metrics::inc_disconnects();
        }
        info!(
            "session={} ended ({:?}) room={} metrics: {}",
            escape_log(&self.id),
            end,
            self.game.state().current_room,
            metrics::snapshot()
        );
        end
    }

    async fn play(&mut self) -> SessionEnd {
        let greeting = self.game.greet();
        if let Err(e) = self.send(&greeting).await {
            warn!("session={} greeting failed: {}", escape_log(&self.id), e);
            return SessionEnd::Disconnected;
        }

        while !self.game.is_done() {
            let input = match self.receive().await {
                Ok(Some(input)) => input,
                Ok(None) => {
                    info!("session={} peer disconnected", escape_log(&self.id));
                    return SessionEnd::Disconnected;
                }
                Err(e) => {
                    warn!("session={} read failed: {}", escape_log(&self.id), e);
                    return SessionEnd::Disconnected;
                }
            };

            let reply = self.game.turn(&input);
            if let Err(e) = self.send(&reply).await {
                warn!("session={} write failed: {}", escape_log(&self.id), e);
                return SessionEnd::Disconnected;
            }
        }
        SessionEnd::Finished
    }
}
