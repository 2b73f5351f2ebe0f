//! Lexical analyzer.
//!
//! Turns raw user text into normalized tokens. Lowercases, drops
//! apostrophes so contractions collapse ("don't" -> "dont"), treats other
//! punctuation as a separator, and keeps sentence-ending marks as boundary
//! tokens so negation scope can stop at the end of a sentence.
//!
//! The analyzer never fails. Empty or whitespace-only input yields an
//! empty token sequence.

use super::token::{Token, TokenTag};

/// Words that open a negation window.
pub const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "doesnt", "didnt", "cant", "cannot", "wont", "isnt", "arent",
    "wasnt", "werent", "shouldnt", "couldnt", "wouldnt", "havent", "hasnt", "nothing", "nobody",
    "nor", "neither", "without", "hardly",
];

/// Adverbs that amplify the word that follows.
pub const INTENSIFIERS: &[&str] = &[
    "very", "really", "so", "extremely", "too", "super", "incredibly", "totally", "completely",
    "absolutely", "deeply", "truly",
];

/// Conjunctions that close an open negation window.
const SCOPE_BREAKERS: &[&str] = &["but", "however", "although", "though"];

/// Default number of words a negator reaches forward.
pub const DEFAULT_NEGATION_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Word(&'a str),
    Boundary(char),
}

/// Tokenizes and normalizes raw input.
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    negation_window: usize,
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            negation_window: DEFAULT_NEGATION_WINDOW,
        }
    }

    /// Sets how many words after a negator are tagged as negated.
    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    /// Normalizes raw text into a token sequence.
    pub fn normalize(&self, raw: &str) -> Vec<Token> {
        let lowered = clean(raw);
        let mut tokens: Vec<Token> = pieces(&lowered)
            .into_iter()
            .map(|piece| match piece {
                Piece::Word(word) => Token::new(word, classify_word(word)),
                Piece::Boundary(mark) => Token::new(mark.to_string(), Some(TokenTag::SentenceEnd)),
            })
            .collect();

        self.tag_negation(&mut tokens);
        tokens
    }

    fn tag_negation(&self, tokens: &mut [Token]) {
        let mut remaining = 0usize;
        for token in tokens.iter_mut() {
            if !token.is_word() {
                remaining = 0;
                continue;
            }
            if token.is_negator() {
                remaining = self.negation_window;
                continue;
            }
            if SCOPE_BREAKERS.contains(&token.text()) {
                remaining = 0;
                continue;
            }
            if remaining > 0 {
                token.mark_negated();
                remaining -= 1;
            }
        }
    }
}

fn classify_word(word: &str) -> Option<TokenTag> {
    if NEGATORS.contains(&word) {
        Some(TokenTag::Negator)
    } else if INTENSIFIERS.contains(&word) {
        Some(TokenTag::Intensifier)
    } else {
        None
    }
}

/// Lowercases and removes apostrophes so contractions become single words.
fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '\u{2018}' | '`'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn pieces(cleaned: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in cleaned.char_indices() {
        if ch.is_alphanumeric() {
            if start.is_none() {
                start = Some(idx);
            }
            continue;
        }
        if let Some(s) = start.take() {
            out.push(Piece::Word(&cleaned[s..idx]));
        }
        if matches!(ch, '.' | '!' | '?') && !matches!(out.last(), Some(Piece::Boundary(_))) {
            out.push(Piece::Boundary(ch));
        }
    }
    if let Some(s) = start {
        out.push(Piece::Word(&cleaned[s..]));
    }
    out
}

/// Normalizes a pattern phrase into its word sequence.
///
/// Patterns are compiled with the same rules as user text so that
/// "can't sleep" in a lexicon matches "I CAN'T sleep!" in a message.
pub fn normalize_phrase(phrase: &str) -> Vec<String> {
    pieces(&clean(phrase))
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Word(word) => Some(word.to_string()),
            Piece::Boundary(_) => None,
        })
        .collect()
}

/// Flattens raw text into a space-padded word string for substring matching.
///
/// Sentence marks are dropped, so the result ignores negation entirely.
/// A phrase matches on word boundaries when searched as `" {phrase} "`.
pub fn normalize_for_matching(raw: &str) -> String {
    let words = normalize_phrase(raw);
    format!(" {} ", words.join(" "))
}

/// Returns the start index of every occurrence of `phrase` in `tokens`.
pub fn find_phrase(tokens: &[Token], phrase: &[String]) -> Vec<usize> {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return Vec::new();
    }
    tokens
        .windows(phrase.len())
        .enumerate()
        .filter(|(_, window)| window.iter().zip(phrase).all(|(t, p)| t.text() == p))
        .map(|(idx, _)| idx)
        .collect()
}
