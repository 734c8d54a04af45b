//! GameSession - the turn controller and the primary public API.
//!
//! A session owns the whole game state (mood, history, phase) and a model
//! gateway, and runs the three-pass protocol for each submitted message:
//! amulet check (only while calm), mood assessment, reply generation.
//! Exactly one turn is ever in flight; submissions made in any other phase
//! are rejected without touching state or the model.

use crate::classifier::{classify_mood, mentions_amulet};
use crate::gateway::{GatewayError, ModelGateway};
use crate::generator::generate_reply;
use crate::history::History;
use crate::mood::{Mood, Verdict};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;

/// Munch's line when handed the amulet.
pub const VICTORY_LINE: &str =
    "...amulet? For Munch? Munch... Munch not angry now. You good squishy. You go in peace.";

/// Munch's line when his anger hits the ceiling.
pub const DEATH_LINE: &str = "RAAAAARGH! MUNCH SMASH! ...everything goes dark.";

/// Errors from session operations that touch the outside world.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where the turn controller currently is. Exactly one phase is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingForUser,
    CheckingAmulet,
    AssessingMood,
    GeneratingResponse,
    GameOver,
    Victory,
}

/// How a submitted message resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Munch replied; the game goes on.
    Continue,
    /// The amulet was offered while Munch was calm.
    Victory,
    /// Munch's anger reached 9.
    GameOver,
    /// Empty input, or a turn was already in flight. Nothing changed.
    Rejected,
}

/// Everything one turn produced.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    /// Munch's line for this turn, if the turn produced one.
    pub reply: Option<String>,
    /// The mood classifier's verdict, if that pass ran.
    pub verdict: Option<Verdict>,
    /// Mood after the turn.
    pub mood: Mood,
}

/// Configuration for creating a new game session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Fixed starting mood instead of the random [3, 7] roll.
    pub starting_mood: Option<Mood>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the first game's starting mood.
    pub fn with_starting_mood(mut self, mood: Mood) -> Self {
        self.starting_mood = Some(mood);
        self
    }
}

/// One game of Munch the Orc.
pub struct GameSession {
    gateway: Arc<dyn ModelGateway>,
    mood: Mood,
    history: History,
    phase: Phase,
}

impl GameSession {
    /// Create a session over the given gateway with a random starting mood.
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self::with_config(gateway, SessionConfig::new())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(gateway: Arc<dyn ModelGateway>, config: SessionConfig) -> Self {
        Self {
            gateway,
            mood: config.starting_mood.unwrap_or_else(Mood::random_start),
            history: History::new(),
            phase: Phase::WaitingForUser,
        }
    }

    /// Connect to the llama.cpp server named by `LLAMA_SERVER_URL` (default
    /// localhost:8080), probing its health before returning a session.
    pub async fn connect(config: SessionConfig) -> Result<Self, SessionError> {
        let client = llamacpp::Llama::from_env();
        client.health().await.map_err(GatewayError::from)?;
        Ok(Self::with_config(Arc::new(client), config))
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The game has reached a terminal phase and needs a restart.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver | Phase::Victory)
    }

    /// Run one full turn for `input`.
    ///
    /// Infallible by design: every gateway failure is absorbed into an
    /// inert verdict or the canned filler reply.
    pub async fn submit(&mut self, input: &str) -> TurnReport {
        let input = input.trim();
        if input.is_empty() || self.phase != Phase::WaitingForUser {
            return TurnReport {
                outcome: TurnOutcome::Rejected,
                reply: None,
                verdict: None,
                mood: self.mood,
            };
        }

        self.history.push_player(input);

        // Pass 1: the amulet only works on a calm orc.
        if self.mood.is_calm() {
            self.phase = Phase::CheckingAmulet;
            if mentions_amulet(input) {
                self.phase = Phase::Victory;
                self.mood = Mood::CALMEST;
                self.history.push_munch(VICTORY_LINE);
                return TurnReport {
                    outcome: TurnOutcome::Victory,
                    reply: Some(VICTORY_LINE.to_string()),
                    verdict: None,
                    mood: self.mood,
                };
            }
        }

        // Pass 2: did that make him angrier?
        self.phase = Phase::AssessingMood;
        let verdict = classify_mood(self.gateway.as_ref(), &self.history, self.mood).await;
        self.mood = self.mood.apply(verdict);

        if self.mood.is_lethal() {
            self.phase = Phase::GameOver;
            self.history.push_munch(DEATH_LINE);
            return TurnReport {
                outcome: TurnOutcome::GameOver,
                reply: Some(DEATH_LINE.to_string()),
                verdict: Some(verdict),
                mood: self.mood,
            };
        }

        // Pass 3: let him talk.
        self.phase = Phase::GeneratingResponse;
        let reply = generate_reply(self.gateway.as_ref(), &self.history, self.mood).await;
        self.history.push_munch(&reply);
        self.phase = Phase::WaitingForUser;

        TurnReport {
            outcome: TurnOutcome::Continue,
            reply: Some(reply),
            verdict: Some(verdict),
            mood: self.mood,
        }
    }

    /// Start a fresh game: mood re-rolled uniformly over [3, 7], history
    /// back to the single seed line, phase back to waiting.
    pub fn restart(&mut self) {
        self.mood = Mood::random_start();
        self.history.reset();
        self.phase = Phase::WaitingForUser;
    }

    /// Write the conversation so far to `path` as pretty JSON.
    pub async fn save_transcript(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let content = serde_json::to_string_pretty(self.history.entries())?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub(crate) fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }
}
