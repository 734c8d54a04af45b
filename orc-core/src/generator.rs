//! Munch's free-text replies.
//!
//! One generation call per turn: fixed persona with few-shot examples, a
//! mood-derived temper phrase, and the full role-tagged history. The raw
//! completion is cut at the first role-delimiter the model hallucinates.

use crate::gateway::{CompletionParams, ModelGateway};
use crate::history::History;
use crate::mood::Mood;

/// Shown when the model call fails or produces nothing usable.
pub const FILLER_LINE: &str = "Munch... Munch brain hurt. No can think. You say again.";

const PERSONA: &str = include_str!("prompts/persona.txt");

/// Markers after which the model has stopped speaking as Munch.
const ROLE_MARKERS: [&str; 5] = ["user:", "---", "assistant:", "human:", "munch:"];

/// How the current mood colors the reply.
pub fn temper_phrase(mood: Mood) -> &'static str {
    match mood.value() {
        0..=2 => "Munch is grumpy but almost calm right now.",
        3..=5 => "Munch is irritated and impatient right now.",
        6..=8 => "Munch is furious and barely holding back right now.",
        _ => "Munch is beyond reason.",
    }
}

/// Cut `raw` immediately before the earliest role marker, case-insensitive.
///
/// If no marker occurs, the trimmed raw output is returned unmodified.
pub fn truncate_at_role_marker(raw: &str) -> String {
    let cut = ROLE_MARKERS
        .iter()
        .filter_map(|marker| find_ascii_ci(raw, marker))
        .min();

    match cut {
        Some(pos) => raw[..pos].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

// ASCII-only case-insensitive search. A match can only start on an ASCII
// byte, so the returned offset is always a char boundary.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Generate Munch's reply to the conversation so far.
///
/// Any gateway failure, or a completion that truncates to nothing, becomes
/// the fixed filler line; the turn always gets some reply.
pub async fn generate_reply(
    gateway: &dyn ModelGateway,
    history: &History,
    mood: Mood,
) -> String {
    let prompt = build_reply_prompt(history, mood);
    match gateway
        .create_completion(&prompt, &CompletionParams::generation())
        .await
    {
        Ok(raw) => {
            let cleaned = truncate_at_role_marker(&raw);
            if cleaned.is_empty() {
                FILLER_LINE.to_string()
            } else {
                cleaned
            }
        }
        Err(_) => FILLER_LINE.to_string(),
    }
}

pub(crate) fn build_reply_prompt(history: &History, mood: Mood) -> String {
    format!(
        "{persona}\n{temper}\n\n{history}\nMunch:",
        persona = PERSONA.trim_end(),
        temper = temper_phrase(mood),
        history = history.render(),
    )
}
