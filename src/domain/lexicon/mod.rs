//! Lexicon module.
//!
//! Tokenization and normalization shared by every signal extractor.

mod analyzer;
mod token;

pub use analyzer::{
    find_phrase, normalize_for_matching, normalize_phrase, LexicalAnalyzer,
    DEFAULT_NEGATION_WINDOW, INTENSIFIERS, NEGATORS,
};
pub use token::{Token, TokenTag};
