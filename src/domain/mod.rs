//! Domain layer containing the conversational core.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, state machines)
//! - `lexicon` - Tokenization and negation scoping shared by all extractors
//! - `signals` - Intent, sentiment and risk vocabulary for one turn
//! - `session` - Per-session rolling context and the mood log
//! - `dialogue` - Dialogue state machine and the per-turn strategy policy
//! - `composer` - Turns a strategy directive into reply text
//! - `resources` - Keys and entries exchanged with the resource library

pub mod composer;
pub mod dialogue;
pub mod foundation;
pub mod lexicon;
pub mod resources;
pub mod session;
pub mod signals;
