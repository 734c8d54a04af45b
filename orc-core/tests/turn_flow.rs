//! Integration tests for the full turn protocol, driven through the mock
//! gateway harness.

use orc_core::{Mood, TestHarness, TurnOutcome, Verdict};
use orc_core::{DEATH_LINE, SEED_LINE, VICTORY_LINE};

// =============================================================================
// AMULET PASS
// =============================================================================

#[tokio::test]
async fn test_amulet_victory_when_calm() {
    let mut harness = TestHarness::with_mood(Mood::new(2));

    let report = harness.submit("Here, amulet for you").await;

    assert_eq!(report.outcome, TurnOutcome::Victory);
    assert_eq!(report.mood, Mood::CALMEST);
    assert_eq!(report.verdict, None);
    assert_eq!(report.reply.as_deref(), Some(VICTORY_LINE));
    assert!(harness.session.is_over());
    // Neither the mood pass nor the generation pass touched the model.
    assert_eq!(harness.call_count(), 0);
}

#[tokio::test]
async fn test_amulet_ignored_when_not_calm() {
    let mut harness = TestHarness::with_mood(Mood::new(3));
    harness.expect_completion("unchanged");
    harness.expect_completion("Munch keep amulet. You keep walking.");

    let report = harness.submit("I brought you an amulet!").await;

    // Mood 3 is past the calm gate, so the offer goes unnoticed.
    assert_eq!(report.outcome, TurnOutcome::Continue);
    assert_eq!(harness.call_count(), 2);
}

#[tokio::test]
async fn test_calm_turn_without_amulet_runs_remaining_passes() {
    let mut harness = TestHarness::with_mood(Mood::new(1));
    harness.expect_completion("calmer");
    harness.expect_completion("Hmph. You not so bad.");

    let report = harness.submit("You seem like a reasonable orc.").await;

    assert_eq!(report.outcome, TurnOutcome::Continue);
    assert_eq!(report.mood, Mood::new(0));
    assert_eq!(harness.call_count(), 2);
}

// =============================================================================
// MOOD PASS
// =============================================================================

#[tokio::test]
async fn test_angrier_verdict_moves_mood_up() {
    let mut harness = TestHarness::with_mood(Mood::new(5));
    harness.expect_completion("angrier");
    harness.expect_completion("GRRR. Watch your mouth.");

    let report = harness.submit("Your cave smells terrible.").await;

    assert_eq!(report.verdict, Some(Verdict::Angrier));
    assert_eq!(report.mood, Mood::new(6));
    assert_eq!(report.outcome, TurnOutcome::Continue);
}

#[tokio::test]
async fn test_mood_nine_is_game_over() {
    let mut harness = TestHarness::with_mood(Mood::new(8));
    harness.expect_completion("angrier");

    let report = harness.submit("You are a stupid, ugly orc.").await;

    assert_eq!(report.outcome, TurnOutcome::GameOver);
    assert_eq!(report.mood, Mood::LETHAL);
    assert_eq!(report.reply.as_deref(), Some(DEATH_LINE));
    assert!(harness.session.is_over());
    // The reply generator never ran.
    assert_eq!(harness.call_count(), 1);
}

#[tokio::test]
async fn test_mood_eight_does_not_end_game_early() {
    let mut harness = TestHarness::with_mood(Mood::new(7));
    harness.expect_completion("angrier");
    harness.expect_completion("MUNCH WARN YOU ONCE.");

    let report = harness.submit("Calm down, big guy.").await;

    // 8 is one short of lethal; the game continues.
    assert_eq!(report.outcome, TurnOutcome::Continue);
    assert_eq!(report.mood, Mood::new(8));
}

#[tokio::test]
async fn test_classifier_failure_is_inert() {
    let mut harness = TestHarness::with_mood(Mood::new(5));
    harness.expect_failure();
    harness.expect_completion("Munch no understand. Munch confused.");

    let report = harness.submit("What do you think about the weather?").await;

    assert_eq!(report.verdict, Some(Verdict::Unparseable));
    assert_eq!(report.mood, Mood::new(5));
    assert_eq!(report.outcome, TurnOutcome::Continue);
}

#[tokio::test]
async fn test_rambling_verdict_falls_back_to_substring() {
    let mut harness = TestHarness::with_mood(Mood::new(5));
    harness.expect_completion("I believe Munch got angrier because of the insult.");
    harness.expect_completion("GRAAH.");

    let report = harness.submit("You fight like a goblin.").await;

    assert_eq!(report.verdict, Some(Verdict::Angrier));
    assert_eq!(report.mood, Mood::new(6));
}

// =============================================================================
// GENERATION PASS
// =============================================================================

#[tokio::test]
async fn test_reply_truncated_at_role_marker() {
    let mut harness = TestHarness::with_mood(Mood::new(5));
    harness.expect_completion("unchanged");
    harness.expect_completion("Me smash! User: what now");

    let report = harness.submit("What will you do?").await;

    assert_eq!(report.reply.as_deref(), Some("Me smash!"));
    assert_eq!(harness.last_line(), Some("Me smash!"));
}

#[tokio::test]
async fn test_generator_failure_yields_filler() {
    let mut harness = TestHarness::with_mood(Mood::new(5));
    harness.expect_completion("unchanged");
    harness.expect_failure();

    let report = harness.submit("Tell me a story.").await;

    // The turn still completes with the canned line.
    assert_eq!(report.outcome, TurnOutcome::Continue);
    let reply = report.reply.unwrap();
    assert!(reply.contains("brain hurt"));
    assert_eq!(harness.last_line(), Some(reply.as_str()));
    assert!(!harness.session.is_over());
}

// =============================================================================
// TURN REJECTION
// =============================================================================

#[tokio::test]
async fn test_empty_input_rejected() {
    let mut harness = TestHarness::with_mood(Mood::new(5));

    let report = harness.submit("   ").await;

    assert_eq!(report.outcome, TurnOutcome::Rejected);
    assert_eq!(harness.history_len(), 1);
    assert_eq!(harness.call_count(), 0);
}

#[tokio::test]
async fn test_submission_after_game_over_rejected() {
    let mut harness = TestHarness::with_mood(Mood::new(8));
    harness.expect_completion("angrier");
    harness.submit("insult").await;

    let history_before = harness.history_len();
    let calls_before = harness.call_count();

    let report = harness.submit("hello? are you still there?").await;

    assert_eq!(report.outcome, TurnOutcome::Rejected);
    assert_eq!(harness.history_len(), history_before);
    assert_eq!(harness.call_count(), calls_before);
}

// =============================================================================
// RESTART
// =============================================================================

#[tokio::test]
async fn test_restart_resets_everything() {
    let mut harness = TestHarness::with_mood(Mood::new(2));
    harness.submit("take my amulet").await;
    assert!(harness.session.is_over());

    harness.session.restart();

    assert!((3..=7).contains(&harness.mood().value()));
    assert_eq!(harness.history_len(), 1);
    assert_eq!(harness.last_line(), Some(SEED_LINE));
    assert!(!harness.session.is_over());
}

#[tokio::test]
async fn test_restart_allows_play_again() {
    let mut harness = TestHarness::with_mood(Mood::new(8));
    harness.expect_completion("angrier");
    harness.submit("insult").await;

    harness.session.restart();
    harness.set_mood(Mood::new(5));
    harness.expect_completion("unchanged");
    harness.expect_completion("Munch listening.");

    let report = harness.submit("Hello again.").await;
    assert_eq!(report.outcome, TurnOutcome::Continue);
}

// =============================================================================
// END TO END (spec scenario)
// =============================================================================

#[tokio::test]
async fn test_seed_mood_two_amulet_offer_wins_immediately() {
    let mut harness = TestHarness::with_mood(Mood::new(2));

    let report = harness.submit("Here, amulet for you").await;

    assert_eq!(report.outcome, TurnOutcome::Victory);
    assert_eq!(report.mood.value(), 0);
    // History holds seed + offer + victory line, nothing else.
    assert_eq!(harness.history_len(), 3);
    assert_eq!(harness.call_count(), 0);
}

// =============================================================================
// TRANSCRIPT EXPORT
// =============================================================================

#[tokio::test]
async fn test_save_transcript_round_trips() {
    let mut harness = TestHarness::with_mood(Mood::new(5));
    harness.expect_completion("unchanged");
    harness.expect_completion("Munch say hi.");
    harness.submit("hi").await;

    let path = std::env::temp_dir().join("orc-core-test-transcript.json");
    harness.session.save_transcript(&path).await.unwrap();

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    let entries: Vec<orc_core::Utterance> = serde_json::from_str(&content).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].text, SEED_LINE);

    tokio::fs::remove_file(&path).await.unwrap();
}
