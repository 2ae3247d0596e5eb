//! TCP bootstrap around the session loop.
//!
//! The server loads the world once, then accepts clients one at a time.
//! Each connection gets a brand-new [`Game`]; only the immutable world
//! definition is shared between sessions.

pub mod client;
pub mod session;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::{info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::config::Config;
use crate::game::{EchoResponder, Game, Phrasebook, Responder, WorldDefinition};

pub use session::{Session, SessionEnd};

pub struct GameServer {
    config: Config,
    world: Arc<WorldDefinition>,
    phrasebook: Option<Phrasebook>,
}

impl GameServer {
    /// Validate the config and load the world and phrasebook. Broken world
    /// files are rejected here, before any client connects.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let world = config
            .game
            .load_world()
            .map_err(|e| anyhow!("Failed to load world: {}", e))?;
        let phrasebook = config
            .game
            .load_phrasebook()
            .map_err(|e| anyhow!("Failed to load phrasebook: {}", e))?;

        info!(
            "World ready: {} rooms, {} objects, light source '{}'",
            world.graph.len(),
            world.objects.len(),
            world.light_source
        );

        Ok(Self {
            config,
            world: Arc::new(world),
            phrasebook,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn world(&self) -> &WorldDefinition {
        &self.world
    }

    /// Fresh per-connection game state.
    pub fn new_game(&self) -> Result<Game> {
        let responder: Box<dyn Responder> = match &self.phrasebook {
            Some(book) => Box::new(book.fork()),
            None => Box::new(EchoResponder),
        };
        let game = Game::new(self.world.clone(), self.config.game_settings())?
            .with_hazard(self.config.game.hazard())
            .with_responder(responder);
        Ok(game)
    }

    /// Bind the configured address and serve.
    pub async fn run(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.server.bind, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
        info!("{} listening on {}", self.config.game.name, addr);
        self.serve(listener).await
    }

    /// Accept clients one after another on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        loop {
            let (stream, peer) = listener.accept().await?;
            info!("Client connected from {}", peer);
            let end = self.serve_connection(stream).await?;
            info!("Client {} finished: {:?}", peer, end);

            if self.config.server.single_session {
                info!("single_session set; shutting down");
                return Ok(());
            }
        }
    }

    /// Play one full session over any duplex stream.
    pub async fn serve_connection<S>(&self, stream: S) -> Result<SessionEnd>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let game = match self.new_game() {
            Ok(game) => game,
            Err(e) => {
                warn!("Could not start game: {}", e);
                return Err(e);
            }
        };
        let session = Session::new(Uuid::new_v4().to_string(), stream, game, &self.config.server);
        Ok(session.run().await)
    }
}
