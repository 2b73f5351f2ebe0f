//! Guided exercise techniques.

use serde::{Deserialize, Serialize};

use crate::domain::lexicon::Token;
use crate::domain::resources::ResourceCategory;

/// A guided breathing or grounding technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BreathingTechnique {
    #[default]
    Box,
    FourSevenEight,
    Grounding,
}

const BOX_STEPS: &[&str] = &[
    "Breathe in slowly through your nose for a count of 4.",
    "Hold that breath gently for a count of 4.",
    "Breathe out through your mouth for a count of 4.",
    "Hold with empty lungs for a count of 4.",
    "Repeat the square three more times at your own pace.",
];

const FOUR_SEVEN_EIGHT_STEPS: &[&str] = &[
    "Exhale completely through your mouth.",
    "Close your mouth and inhale quietly through your nose for a count of 4.",
    "Hold your breath for a count of 7.",
    "Exhale fully through your mouth for a count of 8.",
    "Repeat the cycle three more times.",
];

const GROUNDING_STEPS: &[&str] = &[
    "Name 5 things you can see around you.",
    "Name 4 things you can physically feel.",
    "Name 3 things you can hear.",
    "Name 2 things you can smell.",
    "Name 1 thing you can taste.",
];

impl BreathingTechnique {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Box => "box breathing",
            Self::FourSevenEight => "4-7-8 breathing",
            Self::Grounding => "5-4-3-2-1 grounding",
        }
    }

    /// Ordered instructions for the technique.
    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            Self::Box => BOX_STEPS,
            Self::FourSevenEight => FOUR_SEVEN_EIGHT_STEPS,
            Self::Grounding => GROUNDING_STEPS,
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps().len()
    }

    /// Library entry describing the technique.
    pub fn resource_category(&self) -> ResourceCategory {
        match self {
            Self::Box => ResourceCategory::BreathingBox,
            Self::FourSevenEight => ResourceCategory::Breathing478,
            Self::Grounding => ResourceCategory::BreathingGrounding,
        }
    }

    /// Picks a technique the user named, if any.
    pub fn mentioned_in(tokens: &[Token]) -> Option<Self> {
        let words: Vec<&str> = tokens.iter().map(Token::text).collect();
        if words.contains(&"grounding") || words.windows(5).any(|w| w == ["5", "4", "3", "2", "1"])
        {
            return Some(Self::Grounding);
        }
        if words.contains(&"478") || words.windows(3).any(|w| w == ["4", "7", "8"]) {
            return Some(Self::FourSevenEight);
        }
        if words.contains(&"box") || words.contains(&"square") {
            return Some(Self::Box);
        }
        None
    }
}
