//! Session core: canonical state, phase derivation, orchestrator, and store

pub mod orchestrator;
pub mod phase;
pub mod state;
pub mod store;

pub use orchestrator::{
    CLOSING_MESSAGE, ConversationMessage, GREETING, MessageRole, Session, SessionError, SessionMode, TurnOutcome,
};
pub use phase::{PhaseStep, phase_tracker};
pub use state::{FinalStrategy, MAX_ASSUMPTIONS, Phase, SessionState};
pub use store::SessionStore;
