//! Munch's anger scale.
//!
//! Mood is a single integer from 0 (almost friendly) to 9 (lethal). It is
//! only ever moved by a classifier verdict, one step at a time, and every
//! constructor and update clamps back into range. Reaching 9 ends the game.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The classifier's judgement of how the last exchange landed.
///
/// `Unparseable` records that the model's output matched nothing in the
/// vocabulary (or that the gateway call failed outright); it is inert when
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Angrier,
    Calmer,
    Unchanged,
    Unparseable,
}

/// Munch's anger level, always in `[0, 9]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mood(u8);

/// Status text per mood value, shown next to the portrait.
const DESCRIPTORS: [&str; 10] = [
    "Munch almost smiling. Almost.",
    "Munch calm. For an orc.",
    "Munch grumbling quietly.",
    "Munch annoyed.",
    "Munch irritated. Axe hand twitching.",
    "Munch angry.",
    "Munch very angry. Knuckles white.",
    "Munch furious. Spit flying.",
    "Munch shaking with rage.",
    "MUNCH SMASH!",
];

impl Mood {
    /// Fully calm.
    pub const CALMEST: Mood = Mood(0);

    /// Terminal anger; the game ends here.
    pub const LETHAL: Mood = Mood(9);

    /// Create a mood, clamping into `[0, 9]`.
    pub fn new(value: u8) -> Self {
        Mood(value.min(9))
    }

    /// A fresh game's mood, uniform over `[3, 7]`.
    pub fn random_start() -> Self {
        Mood(rand::thread_rng().gen_range(3..=7))
    }

    /// The raw 0-9 value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Apply a classifier verdict, one step with saturation.
    pub fn apply(self, verdict: Verdict) -> Mood {
        match verdict {
            Verdict::Angrier => Mood((self.0 + 1).min(9)),
            Verdict::Calmer => Mood(self.0.saturating_sub(1)),
            Verdict::Unchanged | Verdict::Unparseable => self,
        }
    }

    /// Calm enough to even consider an offered amulet.
    pub fn is_calm(self) -> bool {
        self.0 <= 2
    }

    /// Angry enough that asking about the amulet makes things worse.
    pub fn is_seething(self) -> bool {
        self.0 >= 6
    }

    /// Terminal anger.
    pub fn is_lethal(self) -> bool {
        self.0 == 9
    }

    /// Status text for this mood value.
    pub fn descriptor(self) -> &'static str {
        DESCRIPTORS[self.0 as usize]
    }

    /// Portrait art for this mood band.
    pub fn face(self) -> &'static str {
        match self.0 {
            0..=2 => concat!(
                "   .-\"\"-.\n",
                "  / -  - \\\n",
                "  | o  o |\n",
                "  |  __  |\n",
                "   \\ -- /\n",
                "    '--'",
            ),
            3..=5 => concat!(
                "   .-\"\"-.\n",
                "  / \\  / \\\n",
                "  | o  o |\n",
                "  |  /\\  |\n",
                "   \\ == /\n",
                "    '--'",
            ),
            6..=8 => concat!(
                "   .-\"\"-.\n",
                "  / \\__/ \\\n",
                "  | O  O |\n",
                "  | VVVV |\n",
                "   \\ ## /\n",
                "    '--'",
            ),
            _ => concat!(
                "   .-\"\"-.\n",
                "  /#\\__/#\\\n",
                "  |# X  X #|\n",
                "  |# VVVV #|\n",
                "   \\####/\n",
                "    '--'",
            ),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/9", self.0)
    }
}
