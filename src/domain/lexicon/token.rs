//! Normalized token produced per message.

use serde::{Deserialize, Serialize};

/// Marker attached to a token by the lexical analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTag {
    /// A negation word ("not", "never", "dont") that opens a negation window.
    Negator,
    /// An intensifying adverb ("very", "really") that amplifies the next word.
    Intensifier,
    /// A sentence-ending mark; closes any open negation window.
    SentenceEnd,
}

/// One lowercase word (or sentence mark) from a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    text: String,
    tag: Option<TokenTag>,
    negated: bool,
}

impl Token {
    pub(crate) fn new(text: impl Into<String>, tag: Option<TokenTag>) -> Self {
        Self {
            text: text.into(),
            tag,
            negated: false,
        }
    }

    pub(crate) fn mark_negated(&mut self) {
        self.negated = true;
    }

    /// Normalized text of the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> Option<TokenTag> {
        self.tag
    }

    /// Returns true if the token falls inside a negation window.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_negator(&self) -> bool {
        self.tag == Some(TokenTag::Negator)
    }

    pub fn is_intensifier(&self) -> bool {
        self.tag == Some(TokenTag::Intensifier)
    }

    /// Returns true for word tokens, false for sentence marks.
    pub fn is_word(&self) -> bool {
        self.tag != Some(TokenTag::SentenceEnd)
    }
}
