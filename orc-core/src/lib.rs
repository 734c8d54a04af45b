//! Munch the Orc game engine.
//!
//! This crate provides:
//! - The mood tracker (0-9 anger scale) and the verdict type that moves it
//! - The amulet and mood classifiers and the reply generator
//! - The turn controller sequencing them into a three-pass protocol
//! - A scripted mock gateway for deterministic tests
//!
//! # Quick Start
//!
//! ```ignore
//! use orc_core::{GameSession, SessionConfig, TurnOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = GameSession::connect(SessionConfig::new()).await?;
//!
//!     let report = session.submit("Nice cave you have here.").await;
//!     if let Some(reply) = report.reply {
//!         println!("{reply}");
//!     }
//!     if report.outcome != TurnOutcome::Continue {
//!         session.restart();
//!     }
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod gateway;
pub mod generator;
pub mod history;
pub mod mood;
pub mod session;
pub mod testing;

// Primary public API
pub use gateway::{CompletionParams, GatewayError, ModelGateway};
pub use history::{History, Speaker, Utterance, SEED_LINE};
pub use mood::{Mood, Verdict};
pub use session::{
    GameSession, Phase, SessionConfig, SessionError, TurnOutcome, TurnReport, DEATH_LINE,
    VICTORY_LINE,
};
pub use testing::{MockGateway, TestHarness};
