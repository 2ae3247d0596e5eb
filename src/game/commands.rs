//! Command parsing, dispatch and the per-verb handlers.
//!
//! Input is parsed into a [`Command`] first and then dispatched with a single
//! `match`, so every verb has exactly one handler. Routing is total: unknown
//! verbs and handler faults both turn into response text, never into an
//! error leaving the turn.

use std::fmt::Write as _;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::game::hazard::{GrueHazard, HazardEffect};
use crate::game::responder::{echo, EchoResponder, Responder};
use crate::game::state::{OutputBuffer, WorldState};
use crate::game::types::{Direction, Location};
use crate::game::world::WorldDefinition;
use crate::game::GameError;
use crate::logutil::escape_log;
use crate::metrics;

pub const WALL_MESSAGE: &str = "Ouch!  You run into a wall.";
pub const MOVE_USAGE: &str = "Move where? Try: move north, move south, move east or move west.";
pub const EMPTY_BAG: &str = "Your bag is empty.";
pub const MAGIC_WORD_PROMPT: &str = "What's the magic word?";
pub const CANT_HEAR: &str = "I can't hear you.";

/// Parsed form of one line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Move(Option<String>), // move north, go w
    Go(Direction),        // north, n, ...
    Teleport(Option<String>),
    Look,

    // Objects
    Inventory,
    Get(Option<String>),
    Drop(Option<String>),
    Light(Option<String>),

    // Talk
    Say(String),

    // Meta
    Help(Option<String>),
    Debug,
    Quit,

    /// Verb not in the table; carries the literal input.
    Unknown(String),
}

impl Command {
    /// Split on whitespace into a verb and arguments and map the verb.
    pub fn parse(input: &str) -> Command {
        let literal = input.trim();
        let mut parts = literal.split_whitespace();
        let verb = parts.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = parts.collect();
        let first = args.first().map(|s| s.to_string());

        match verb.as_str() {
            "move" | "go" => Command::Move(first),
            "north" | "n" => Command::Go(Direction::North),
            "south" | "s" => Command::Go(Direction::South),
            "east" | "e" => Command::Go(Direction::East),
            "west" | "w" => Command::Go(Direction::West),
            "teleport" => Command::Teleport(first),
            "look" | "l" => Command::Look,

            "inventory" | "inv" | "i" => Command::Inventory,
            "get" | "take" => Command::Get(first),
            "drop" => Command::Drop(first),
            "light" => Command::Light(first),

            "say" => Command::Say(args.join(" ")),

            "help" => Command::Help(first),
            "debug" => Command::Debug,
            "quit" | "exit" => Command::Quit,

            _ => Command::Unknown(literal.to_string()),
        }
    }
}

/// Per-game constants that are not part of the world data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub name: String,
    pub start_room: String,
    /// Listening address and port, reported by `debug`.
    pub address: String,
    pub port: u16,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            name: "Realms of Venture".to_string(),
            start_room: crate::game::seed_loader::CANONICAL_START_ROOM.to_string(),
            address: "0.0.0.0".to_string(),
            port: 50000,
        }
    }
}

/// One player's game: shared world data plus private mutable state.
pub struct Game {
    world: Arc<WorldDefinition>,
    state: WorldState,
    output: OutputBuffer,
    hazard: GrueHazard,
    responder: Box<dyn Responder>,
    settings: GameSettings,
}

impl Game {
    /// Start a new game with the echo responder and the default hazard.
    pub fn new(world: Arc<WorldDefinition>, settings: GameSettings) -> Result<Self, GameError> {
        world.check_start_room(&settings.start_room)?;
        let hazard = GrueHazard::default();
        let mut state = WorldState::new(&world, &settings.start_room);
        state.countdown = hazard.limit();

        Ok(Self {
            world,
            state,
            output: OutputBuffer::new(),
            hazard,
            responder: Box::new(EchoResponder),
            settings,
        })
    }

    pub fn with_responder(mut self, responder: Box<dyn Responder>) -> Self {
        self.responder = responder;
        self
    }

    pub fn with_hazard(mut self, hazard: GrueHazard) -> Self {
        self.hazard = hazard;
        self.state.countdown = hazard.limit();
        self
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn world(&self) -> &WorldDefinition {
        &self.world
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }

    /// Welcome text plus the starting room, as the first message of a session.
    pub fn greet(&mut self) -> String {
        let text = match self.describe_current() {
            Ok(desc) => format!("Welcome to {}! {}", self.settings.name, desc),
            Err(e) => format!("Welcome to {}! doof! {}", self.settings.name, e),
        };
        self.output.overwrite(&text);
        self.output.take()
    }

    /// Run one turn and return the text to flush. Always yields a response.
    pub fn turn(&mut self, input: &str) -> String {
        self.output.clear();
        self.route(input);
        metrics::inc_turns();
        self.output.take()
    }

    /// Parse, dispatch, then run the darkness hazard if the turn succeeded.
    pub fn route(&mut self, input: &str) {
        let command = Command::parse(input);
        debug!(
            "Command parsed: input={} command={:?}",
            escape_log(input),
            command
        );

        let result = match command {
            Command::Unknown(literal) => {
                metrics::inc_unknown_commands();
                self.output.push_line(&format!(
                    "Sorry, I don't know how to \"{}\". Try: help please",
                    literal
                ));
                return;
            }
            Command::Move(direction) => self.handle_move(direction),
            Command::Go(direction) => self.go(direction),
            Command::Teleport(room) => self.handle_teleport(room),
            Command::Look => self.handle_look(),
            Command::Inventory => self.handle_inventory(),
            Command::Get(object) => self.handle_get(object),
            Command::Drop(object) => self.handle_drop(object),
            Command::Light(object) => self.handle_light(object),
            Command::Say(text) => self.handle_say(text),
            Command::Help(topic) => self.handle_help(topic),
            Command::Debug => self.handle_debug(),
            Command::Quit => self.handle_quit(),
        };

        if let Err(e) = result {
            warn!("Bad command {}: {}", escape_log(input), e);
            self.output.overwrite(&format!("doof! {}", e));
            return;
        }

        if self.state.done {
            return;
        }

        match self
            .hazard
            .evaluate(&self.world.graph, &mut self.state, &mut self.output)
        {
            Ok(HazardEffect::Eaten) => metrics::inc_grue_deaths(),
            Ok(_) => {}
            Err(e) => {
                warn!("Hazard evaluation failed: {}", e);
                self.output.overwrite(&format!("doof! {}", e));
            }
        }
    }

    fn describe_current(&self) -> Result<String, GameError> {
        self.world.graph.describe(&self.state.current_room, &self.state)
    }

    fn handle_move(&mut self, direction: Option<String>) -> Result<(), GameError> {
        let token = match direction {
            Some(token) => token,
            None => {
                self.output.push_line(MOVE_USAGE);
                return Ok(());
            }
        };

        match token.parse::<Direction>() {
            Ok(direction) => self.go(direction),
            Err(_) => {
                self.output.push_line(&format!(
                    "Yuck! You tried to go \"{}\" and stepped in a tar pit. You stay where you are.",
                    token
                ));
                Ok(())
            }
        }
    }

    fn go(&mut self, direction: Direction) -> Result<(), GameError> {
        let destination = self
            .world
            .graph
            .neighbor(&self.state.current_room, direction)?
            .cloned();

        match destination {
            Some(room_id) => {
                debug!("Moving {} from {} to {}", direction, self.state.current_room, room_id);
                self.state.current_room = room_id;
                let desc = self.describe_current()?;
                self.output.push_line(&desc);
            }
            None => self.output.push_line(WALL_MESSAGE),
        }
        Ok(())
    }

    fn handle_teleport(&mut self, room: Option<String>) -> Result<(), GameError> {
        let room_id = match room {
            Some(room_id) => room_id,
            None => {
                self.output
                    .push_line("Teleport where? Try: teleport <room number>");
                return Ok(());
            }
        };

        if !self.world.graph.contains(&room_id) {
            warn!("Teleport to unknown room {}; ending session", escape_log(&room_id));
            self.state.done = true;
            self.output.overwrite(&format!(
                "There is a puff of smoke, but room \"{}\" does not exist. Sorry, the realm cannot hold you any longer. Goodbye!",
                room_id
            ));
            return Ok(());
        }

        self.state.current_room = room_id;
        self.output
            .push_line("There is a puff of smoke. As the smoke dissipates, you find yourself elsewhere.");
        let desc = self.describe_current()?;
        self.output.push_line(&desc);
        Ok(())
    }

    fn handle_look(&mut self) -> Result<(), GameError> {
        let desc = self.describe_current()?;
        self.output.push_line(&desc);
        Ok(())
    }

    fn handle_inventory(&mut self) -> Result<(), GameError> {
        let carried = self.state.carried();
        if carried.is_empty() {
            self.output.push_line(EMPTY_BAG);
            return Ok(());
        }

        let mut text = format!("You are carrying: {}", carried.join(", "));
        if self.state.is_carried(&self.state.light_source) {
            let status = if self.state.lit { "lit" } else { "not lit" };
            let _ = write!(text, "\nYour {} is {}.", self.state.light_source, status);
        }
        self.output.push_line(&text);
        Ok(())
    }

    fn handle_get(&mut self, object: Option<String>) -> Result<(), GameError> {
        let name = match object {
            Some(name) => name,
            None => {
                self.output.push_line("Get what?");
                return Ok(());
            }
        };

        let here = Location::Room(self.state.current_room.clone());
        match self.state.resolve_object(&name) {
            Some(id) if self.state.location_of(&id) == Some(&here) => {
                self.state.relocate(&id, Location::Carried);
                self.output.push_line(&format!("You pick up the {}.", id));
            }
            _ => self
                .output
                .push_line(&format!("You don't see any \"{}\" here.", name)),
        }
        Ok(())
    }

    fn handle_drop(&mut self, object: Option<String>) -> Result<(), GameError> {
        let name = match object {
            Some(name) => name,
            None => {
                self.output.push_line("Drop what?");
                return Ok(());
            }
        };

        let id = match self.state.resolve_object(&name) {
            Some(id) if self.state.is_carried(&id) => id,
            _ => {
                self.output
                    .push_line(&format!("You aren't carrying any \"{}\".", name));
                return Ok(());
            }
        };

        let here = Location::Room(self.state.current_room.clone());
        self.state.relocate(&id, here);
        self.output.push_line(&format!("You drop the {}.", id));

        if self.state.is_light_source(&id) && self.state.lit {
            self.state.lit = false;
            self.output
                .push_line(&format!("The {} sputters and goes out.", id));
        }
        Ok(())
    }

    fn handle_light(&mut self, object: Option<String>) -> Result<(), GameError> {
        let name = match object {
            Some(name) => name,
            None => {
                self.output.push_line("Light what?");
                return Ok(());
            }
        };

        if !self.state.is_light_source(&name) {
            self.output
                .push_line(&format!("You can't light \"{}\".", name));
            return Ok(());
        }

        let id = self.state.light_source.clone();
        if !self.state.is_carried(&id) {
            self.output
                .push_line(&format!("You need to be holding the {} to light it.", id));
        } else if self.state.lit {
            self.output
                .push_line(&format!("Your {} is already lit.", id));
        } else {
            self.state.lit = true;
            self.output
                .push_line(&format!("You light the {}. It casts a warm glow.", id));
        }
        Ok(())
    }

    fn handle_say(&mut self, text: String) -> Result<(), GameError> {
        if text.trim().is_empty() {
            self.output.push_line("Say what?");
            return Ok(());
        }

        let reply = match self.responder.respond(&text) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(
                    "Responder {} had no reply ({}); echoing",
                    self.responder.name(),
                    e
                );
                echo(&text)
            }
        };
        self.output.push_line(&reply);
        Ok(())
    }

    fn handle_help(&mut self, topic: Option<String>) -> Result<(), GameError> {
        match topic {
            None => self.output.push_line(MAGIC_WORD_PROMPT),
            Some(word) if word.eq_ignore_ascii_case("please") => {
                self.output.push_line(&help_text())
            }
            Some(_) => self.output.push_line(CANT_HEAR),
        }
        Ok(())
    }

    fn handle_debug(&mut self) -> Result<(), GameError> {
        let state = &self.state;
        let mut dump = String::new();
        let _ = writeln!(dump, "address: {}", self.settings.address);
        let _ = writeln!(dump, "port: {}", self.settings.port);
        let _ = writeln!(dump, "room: {}", state.current_room);
        let _ = writeln!(dump, "done: {}", state.done);
        let _ = writeln!(dump, "lit: {}", state.lit);
        let _ = writeln!(dump, "countdown: {}", state.countdown);
        let objects: Vec<String> = state
            .objects
            .iter()
            .map(|(id, loc)| format!("{}={}", id, loc))
            .collect();
        let _ = writeln!(dump, "objects: {}", objects.join(", "));
        let _ = writeln!(dump, "rooms:");
        for room in self.world.graph.rooms() {
            let exits: Vec<String> = room
                .exits
                .iter()
                .map(|(dir, target)| format!("{}->{}", dir, target))
                .collect();
            let _ = writeln!(
                dump,
                "  {} {}{} [{}]",
                room.id,
                room.name,
                if room.dark { " (dark)" } else { "" },
                exits.join(" ")
            );
        }
        let _ = writeln!(dump, "responder: {}", self.responder.name());
        let _ = write!(dump, "metrics: {}", metrics::snapshot());

        info!("Debug dump requested:\n{}", dump);
        self.output.push_line(&dump);
        Ok(())
    }

    fn handle_quit(&mut self) -> Result<(), GameError> {
        self.state.done = true;
        self.output
            .overwrite(&format!("Thanks for playing {}. Goodbye!", self.settings.name));
        Ok(())
    }
}

fn help_text() -> String {
    "Since you asked nicely:\n".to_string()
        + "move <north|south|east|west> (or just north, n, ...)\n"
        + "look - describe the room\n"
        + "inventory - what you carry\n"
        + "get <thing> / drop <thing>\n"
        + "light <thing> - banish the dark\n"
        + "say <words>\n"
        + "quit - leave the realm"
}
