//! Testing utilities for the game engine.
//!
//! `MockGateway` replaces the model server with scripted completions, and
//! `TestHarness` wires one into a session with helpers for driving turns
//! and asserting on the resulting state. Every prompt sent through the
//! mock is recorded, so tests can also assert that a pass did NOT call
//! the model.

use crate::gateway::{CompletionParams, GatewayError, ModelGateway};
use crate::mood::Mood;
use crate::session::{GameSession, Phase, SessionConfig, TurnReport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A gateway that returns scripted completions in order.
#[derive(Default)]
pub struct MockGateway {
    responses: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn queue(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a gateway failure.
    pub fn queue_error(&self, message: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Err(message.into()));
    }

    /// How many completion calls have been made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every prompt sent so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn create_completion(
        &self,
        prompt: &str,
        _params: &CompletionParams,
    ) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(GatewayError::Network(message)),
            None => Err(GatewayError::Network(
                "mock gateway has no more scripted responses".to_string(),
            )),
        }
    }
}

/// A session over a mock gateway, with assertion helpers.
pub struct TestHarness {
    pub gateway: Arc<MockGateway>,
    pub session: GameSession,
}

impl TestHarness {
    /// Harness with a mid-scale starting mood of 5.
    pub fn new() -> Self {
        Self::with_mood(Mood::new(5))
    }

    /// Harness with a pinned starting mood.
    pub fn with_mood(mood: Mood) -> Self {
        let gateway = Arc::new(MockGateway::new());
        let session = GameSession::with_config(
            gateway.clone(),
            SessionConfig::new().with_starting_mood(mood),
        );
        Self { gateway, session }
    }

    /// Queue a completion (verdict or reply, whichever call comes next).
    pub fn expect_completion(&self, text: impl Into<String>) -> &Self {
        self.gateway.queue(text);
        self
    }

    /// Queue a gateway failure.
    pub fn expect_failure(&self) -> &Self {
        self.gateway.queue_error("scripted failure");
        self
    }

    /// Submit one player message.
    pub async fn submit(&mut self, input: &str) -> TurnReport {
        self.session.submit(input).await
    }

    /// Force the session's mood mid-game.
    pub fn set_mood(&mut self, mood: Mood) {
        self.session.set_mood(mood);
    }

    pub fn mood(&self) -> Mood {
        self.session.mood()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn history_len(&self) -> usize {
        self.session.history().len()
    }

    /// Text of the most recent history entry.
    pub fn last_line(&self) -> Option<&str> {
        self.session.history().last().map(|u| u.text.as_str())
    }

    pub fn call_count(&self) -> usize {
        self.gateway.call_count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Verdict;
    use crate::session::TurnOutcome;

    #[tokio::test]
    async fn test_mock_scripted_order() {
        let gateway = MockGateway::new();
        gateway.queue("first");
        gateway.queue("second");

        let params = CompletionParams::classification();
        assert_eq!(
            gateway.create_completion("a", &params).await.unwrap(),
            "first"
        );
        assert_eq!(
            gateway.create_completion("b", &params).await.unwrap(),
            "second"
        );
        assert!(gateway.create_completion("c", &params).await.is_err());
        assert_eq!(gateway.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_harness_basic_turn() {
        let mut harness = TestHarness::new();
        harness.expect_completion("unchanged");
        harness.expect_completion("Munch say hello back. Now go.");

        let report = harness.submit("hello").await;

        assert_eq!(report.outcome, TurnOutcome::Continue);
        assert_eq!(report.verdict, Some(Verdict::Unchanged));
        assert_eq!(
            report.reply.as_deref(),
            Some("Munch say hello back. Now go.")
        );
        assert_eq!(harness.mood(), Mood::new(5));
        assert_eq!(harness.call_count(), 2);
    }
}
