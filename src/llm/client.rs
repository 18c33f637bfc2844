//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// This is the core abstraction for the backend transport. The orchestrator
/// sends the full conversation on every turn; the client keeps no state
/// between calls. One call is attempted per user turn - failure is surfaced
/// to the session and the user may resend.
#[async_trait]
pub trait LlmClient: Send + Sync + std::fmt::Debug {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
