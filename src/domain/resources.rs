//! Resource library vocabulary.
//!
//! Static support content (crisis contacts, exercise guides, articles) is
//! owned outside the core. These are the keys and entries exchanged with
//! that collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::lexicon::Token;

/// Key under which the resource library stores an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceCategory {
    Crisis,
    BreathingBox,
    #[serde(rename = "BREATHING_4_7_8")]
    Breathing478,
    BreathingGrounding,
    SleepHygiene,
    JournalingPrompt,
    ProfessionalReferral,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 7] = [
        ResourceCategory::Crisis,
        ResourceCategory::BreathingBox,
        ResourceCategory::Breathing478,
        ResourceCategory::BreathingGrounding,
        ResourceCategory::SleepHygiene,
        ResourceCategory::JournalingPrompt,
        ResourceCategory::ProfessionalReferral,
    ];

    /// Stable key used by library files.
    pub fn key(&self) -> &'static str {
        match self {
            ResourceCategory::Crisis => "CRISIS",
            ResourceCategory::BreathingBox => "BREATHING_BOX",
            ResourceCategory::Breathing478 => "BREATHING_4_7_8",
            ResourceCategory::BreathingGrounding => "BREATHING_GROUNDING",
            ResourceCategory::SleepHygiene => "SLEEP_HYGIENE",
            ResourceCategory::JournalingPrompt => "JOURNALING_PROMPT",
            ResourceCategory::ProfessionalReferral => "PROFESSIONAL_REFERRAL",
        }
    }

    /// Resolves the category a resource request asks for.
    ///
    /// Checked in order: crisis lines, journaling, sleep, exercises, then
    /// professional help, which is also the default.
    pub fn requested_in(tokens: &[Token]) -> Self {
        let has = |words: &[&str]| tokens.iter().any(|t| words.contains(&t.text()));

        if has(&["crisis", "hotline", "helpline", "lifeline", "emergency", "988"]) {
            ResourceCategory::Crisis
        } else if has(&["journal", "journaling", "journalling", "writing", "prompt"]) {
            ResourceCategory::JournalingPrompt
        } else if has(&["sleep", "insomnia", "sleeping"]) {
            ResourceCategory::SleepHygiene
        } else if has(&["grounding"]) {
            ResourceCategory::BreathingGrounding
        } else if has(&["478"]) || tokens.windows(3).any(|w| {
            w.iter().map(Token::text).eq(["4", "7", "8"])
        }) {
            ResourceCategory::Breathing478
        } else if has(&["breathing", "breathe", "breath"]) {
            ResourceCategory::BreathingBox
        } else {
            ResourceCategory::ProfessionalReferral
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One way to reach a support service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContact {
    pub name: String,
    pub detail: String,
}

/// A single library entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub contacts: Vec<ResourceContact>,
}

impl ResourceEntry {
    /// Renders the entry as a text block: title, body, then one line per contact.
    ///
    /// Crisis responses embed this block exactly as returned.
    pub fn render_block(&self) -> String {
        let mut block = format!("{}\n{}", self.title, self.body);
        for contact in &self.contacts {
            block.push_str(&format!("\n- {}: {}", contact.name, contact.detail));
        }
        block
    }
}
