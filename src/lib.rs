//! Marvin - guided strategy coach
//!
//! A conversational front-end that walks a founder through building a
//! strategy in five fixed phases: objective, scope, advantage, draft
//! statement, refined statement. The model drives the conversation; this
//! crate owns the protocol around it.
//!
//! # Core Concepts
//!
//! - **Trailing state block**: every model reply may append a machine-readable
//!   snapshot between `<STATE_JSON>` markers, which is split off before display
//! - **Total normalisation**: whatever shape the snapshot arrives in, the
//!   session state that comes out is always well-formed
//! - **One-shot lock**: an affirmative answer to the commitment question ends
//!   the session without a further model call
//!
//! # Modules
//!
//! - [`protocol`] - State-block split and affirmation classifier
//! - [`session`] - Session state, phase tracking, orchestrator, and store
//! - [`llm`] - LLM client trait and Anthropic implementation
//! - [`config`] - Configuration types and loading
//! - [`repl`] - Interactive terminal front-end
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod prompts;
pub mod protocol;
pub mod repl;
pub mod session;

// Re-export commonly used types
pub use config::{Config, LlmConfig, SessionConfig};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, create_client};
pub use protocol::{COMMITMENT_QUESTION, STATE_CLOSE, STATE_OPEN, is_affirmation, split_reply};
pub use session::{
    CLOSING_MESSAGE, ConversationMessage, FinalStrategy, GREETING, MessageRole, Phase, PhaseStep, Session,
    SessionError, SessionMode, SessionState, SessionStore, TurnOutcome, phase_tracker,
};
