//! Conversation backends for the `say` command.
//!
//! A [`Responder`] is chosen when the game is built: the [`EchoResponder`]
//! when nothing else is configured, or a [`Phrasebook`] loaded from JSON.
//! The say handler treats any responder error as "no reply" and falls back
//! to [`echo`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::game::GameError;

/// Fixed quoting template used when no responder reply is available.
pub fn echo(utterance: &str) -> String {
    format!("You say, \"{}\".", utterance)
}

pub trait Responder: Send {
    /// Short name used in logs and the debug dump.
    fn name(&self) -> &'static str;

    /// Produce the full response text for an utterance.
    fn respond(&mut self, utterance: &str) -> Result<String, GameError>;
}

/// Repeats the player's words back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

impl Responder for EchoResponder {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn respond(&mut self, utterance: &str) -> Result<String, GameError> {
        Ok(echo(utterance))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhraseEntry {
    pub keywords: Vec<String>,
    pub replies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct PhrasebookSeed {
    entries: Vec<PhraseEntry>,
}

/// Keyword-triggered canned replies from the house's resident voice.
#[derive(Debug, Clone)]
pub struct Phrasebook {
    entries: Vec<PhraseEntry>,
    rng: StdRng,
}

impl Phrasebook {
    pub fn new(entries: Vec<PhraseEntry>) -> Self {
        Self {
            entries: normalize(entries),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic reply selection, for tests.
    pub fn with_seed(entries: Vec<PhraseEntry>, seed: u64) -> Self {
        Self {
            entries: normalize(entries),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_json_str(contents: &str, origin: &str) -> Result<Self, GameError> {
        let seed: PhrasebookSeed = serde_json::from_str(contents).map_err(|e| GameError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(seed.entries))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents, &path.display().to_string())
    }

    /// Same entries with an independently seeded generator, one per session.
    pub fn fork(&self) -> Self {
        Self::new(self.entries.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(entries: Vec<PhraseEntry>) -> Vec<PhraseEntry> {
    entries
        .into_iter()
        .filter(|e| !e.replies.is_empty())
        .map(|mut e| {
            e.keywords = e.keywords.iter().map(|k| k.to_lowercase()).collect();
            e
        })
        .collect()
}

impl Responder for Phrasebook {
    fn name(&self) -> &'static str {
        "phrasebook"
    }

    fn respond(&mut self, utterance: &str) -> Result<String, GameError> {
        let words: Vec<String> = utterance
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        let entry = self
            .entries
            .iter()
            .find(|e| e.keywords.iter().any(|k| words.contains(k)))
            .ok_or_else(|| GameError::Responder(format!("no phrase for '{}'", utterance)))?;

        let reply = entry
            .replies
            .choose(&mut self.rng)
            .ok_or_else(|| GameError::Responder("empty reply list".to_string()))?;

        Ok(format!("{}\n{}", echo(utterance), reply))
    }
}
