//! Conversation/state synchronization protocol
//!
//! The model's free-form replies carry an inline machine-readable state block;
//! this module holds the small parsers that keep the conversation and the
//! session state in sync: the state-block splitter and the affirmation
//! classifier, plus the commitment sentinel that arms the one-shot lock.

pub mod affirmation;
pub mod state_block;

pub use affirmation::is_affirmation;
pub use state_block::{STATE_CLOSE, STATE_OPEN, split_reply};

/// Commitment sentinel
///
/// When this exact text appears as a substring of the assistant's user-facing
/// prose, the next user turn is checked for an affirmation; an affirmative
/// answer locks the session.
pub const COMMITMENT_QUESTION: &str = "Are you prepared to back this with resources and focus?";
