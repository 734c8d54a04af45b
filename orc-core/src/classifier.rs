//! The two classification passes of a turn.
//!
//! The amulet check is a plain substring test and never touches the model.
//! The mood classifier asks the model for a one-word verdict over a short
//! history window and parses the answer against a fixed vocabulary, with
//! an explicit fallback rule for free-text drift.

use crate::gateway::{CompletionParams, ModelGateway};
use crate::history::History;
use crate::mood::{Mood, Verdict};

/// The one word that wins the game.
pub const AMULET_WORD: &str = "amulet";

/// How many trailing history entries the mood prompt sees.
pub const MOOD_WINDOW: usize = 6;

const VOCABULARY: [(&str, Verdict); 3] = [
    ("angrier", Verdict::Angrier),
    ("calmer", Verdict::Calmer),
    ("unchanged", Verdict::Unchanged),
];

/// Case-insensitive check for a mention of the amulet.
pub fn mentions_amulet(text: &str) -> bool {
    text.to_lowercase().contains(AMULET_WORD)
}

/// Parse the model's verdict output.
///
/// An exact (trimmed, lower-cased) vocabulary match is accepted first.
/// Otherwise the vocabulary word occurring earliest in the output wins,
/// ties broken by vocabulary order. Anything else is `Unparseable`.
pub fn parse_verdict(raw: &str) -> Verdict {
    let cleaned = raw.trim().to_lowercase();

    for (word, verdict) in VOCABULARY {
        if cleaned == word {
            return verdict;
        }
    }

    let mut best: Option<(usize, Verdict)> = None;
    for (word, verdict) in VOCABULARY {
        if let Some(pos) = cleaned.find(word) {
            if best.map_or(true, |(best_pos, _)| pos < best_pos) {
                best = Some((pos, verdict));
            }
        }
    }

    best.map(|(_, verdict)| verdict).unwrap_or(Verdict::Unparseable)
}

/// Ask the model whether the conversation just made Munch angrier,
/// calmer, or neither.
///
/// Gateway failures are absorbed into `Unparseable`; a turn never dies on
/// this pass.
pub async fn classify_mood(
    gateway: &dyn ModelGateway,
    history: &History,
    mood: Mood,
) -> Verdict {
    let prompt = build_mood_prompt(history, mood);
    match gateway
        .create_completion(&prompt, &CompletionParams::classification())
        .await
    {
        Ok(raw) => parse_verdict(&raw),
        Err(_) => Verdict::Unparseable,
    }
}

pub(crate) fn build_mood_prompt(history: &History, mood: Mood) -> String {
    let hint = if mood.is_seething() {
        "\nMunch becomes angrier if asked for the amulet."
    } else {
        ""
    };

    format!(
        "You judge the mood of Munch, an orc guarding his golden amulet.\n\
         Recent conversation:\n\
         {window}\n\
         Munch's anger is {anger} out of 9.{hint}\n\
         Did the user's last message make Munch angrier, calmer, or unchanged?\n\
         Answer with exactly one word: angrier, calmer, or unchanged.\n\
         Answer:",
        window = history.render_window(MOOD_WINDOW),
        anger = mood.value(),
        hint = hint,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amulet_mention_case_insensitive() {
        assert!(mentions_amulet("Here, take my AMULET"));
        assert!(mentions_amulet("the amulet is yours"));
        assert!(!mentions_amulet("take my necklace"));
        assert!(!mentions_amulet(""));
    }

    #[test]
    fn test_parse_exact_words() {
        assert_eq!(parse_verdict("angrier"), Verdict::Angrier);
        assert_eq!(parse_verdict("  Calmer \n"), Verdict::Calmer);
        assert_eq!(parse_verdict("UNCHANGED"), Verdict::Unchanged);
    }

    #[test]
    fn test_parse_substring_fallback() {
        assert_eq!(
            parse_verdict("Munch got much angrier after that."),
            Verdict::Angrier
        );
        assert_eq!(parse_verdict("I think: calmer."), Verdict::Calmer);
    }

    #[test]
    fn test_parse_earliest_occurrence_wins() {
        assert_eq!(
            parse_verdict("calmer? no wait, angrier"),
            Verdict::Calmer
        );
        assert_eq!(
            parse_verdict("unchanged, definitely not calmer"),
            Verdict::Unchanged
        );
    }

    #[test]
    fn test_parse_garbage_is_unparseable() {
        assert_eq!(parse_verdict("Munch feels hungry."), Verdict::Unparseable);
        assert_eq!(parse_verdict(""), Verdict::Unparseable);
    }

    #[test]
    fn test_mood_prompt_includes_hint_when_seething() {
        let history = History::new();
        let hot = build_mood_prompt(&history, Mood::new(6));
        assert!(hot.contains("angrier if asked for the amulet"));

        let cool = build_mood_prompt(&history, Mood::new(5));
        assert!(!cool.contains("angrier if asked for the amulet"));
    }

    #[test]
    fn test_mood_prompt_windows_history() {
        let mut history = History::new();
        for i in 0..10 {
            history.push_player(format!("line {i}"));
        }
        let prompt = build_mood_prompt(&history, Mood::new(4));
        assert!(prompt.contains("line 9"));
        assert!(!prompt.contains("line 3"));
    }
}
