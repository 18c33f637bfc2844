//! Conversation orchestrator
//!
//! A `Session` owns the message log, the canonical state, and the session
//! flags, and sequences each user turn: append the user message, invoke the
//! backend once, split prose from the state payload, normalise, and detect
//! the commitment lock. All mutation happens after the backend call fully
//! resolves - a turn either commits completely or (on backend failure) leaves
//! state and strategy untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::protocol::{COMMITMENT_QUESTION, is_affirmation, split_reply};

use super::state::{FinalStrategy, SessionState};

/// Fixed closing line appended when the user affirms commitment
pub const CLOSING_MESSAGE: &str = "Good. Then it's about focus and follow-through.";

/// Assistant greeting seeded into every fresh session
pub const GREETING: &str =
    "We'll build this step by step.\n\nBefore we go further, what does the business do, and who pays you?";

/// Max tokens requested per coaching reply
const REPLY_MAX_TOKENS: u32 = 1100;

/// Session mode - alters the instructional framing sent to the backend,
/// never the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Practical and easy to answer
    #[default]
    Workshop,
    /// Direct and exact
    Board,
}

impl SessionMode {
    /// Parse a user-supplied mode name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "workshop" => Some(SessionMode::Workshop),
            "board" => Some(SessionMode::Board),
            _ => None,
        }
    }

    /// Instructional suffix appended to the system prompt
    pub fn suffix(&self) -> &'static str {
        match self {
            SessionMode::Workshop => {
                "\n\nSession mode: Workshop.\n\
                 - Keep it practical and easy to answer.\n\
                 - Ask one question at a time.\n\
                 - Use plain language.\n"
            }
            SessionMode::Board => {
                "\n\nSession mode: Board.\n\
                 - Be more direct and exact.\n\
                 - Pressure-test targets with practical questions.\n\
                 - Keep it grounded and short.\n"
            }
        }
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::Workshop => write!(f, "Workshop"),
            SessionMode::Board => write!(f, "Board"),
        }
    }
}

/// Role of a logged conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One entry of the append-only message log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Errors rejecting a submission before any turn work happens
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session is locked. Reset to start again.")]
    Locked,

    #[error("Empty message")]
    EmptyMessage,
}

/// What a submitted turn produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The user affirmed commitment; the session is now locked
    Locked,
    /// Normal assistant reply appended (state may or may not have updated)
    Replied,
    /// Backend call failed; an error message was appended and the session
    /// remains active
    Failed { message: String },
}

/// A single coaching conversation
///
/// Exclusively owns its log, state, and flags; the rendering layer only
/// reads snapshots and submits input.
pub struct Session {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    mode: SessionMode,
    log: Vec<ConversationMessage>,
    state: SessionState,
    final_strategy: Option<FinalStrategy>,
    has_started: bool,
    is_locked: bool,
    awaiting_commitment: bool,
    last_error: Option<String>,
}

impl Session {
    /// Create a fresh session seeded with the system prompt and greeting
    pub fn new(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>, mode: SessionMode) -> Self {
        let system_prompt = system_prompt.into();
        debug!(%mode, "Session::new: called");
        Self {
            llm,
            log: Self::seeded_log(&system_prompt),
            system_prompt,
            mode,
            state: SessionState::default(),
            final_strategy: None,
            has_started: false,
            is_locked: false,
            awaiting_commitment: false,
            last_error: None,
        }
    }

    fn seeded_log(system_prompt: &str) -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::system(system_prompt),
            ConversationMessage::assistant(GREETING),
        ]
    }

    /// Submit a user message and run one orchestrator turn
    ///
    /// At most one backend call is made; its completion is fully resolved
    /// before any state is committed. A locked session rejects input until
    /// reset.
    pub async fn submit(&mut self, text: &str) -> Result<TurnOutcome, SessionError> {
        let text = text.trim();
        debug!(text_len = text.len(), "Session::submit: called");

        if self.is_locked {
            debug!("Session::submit: session locked");
            return Err(SessionError::Locked);
        }
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        // One-shot commitment check - no backend call on this path
        if self.awaiting_commitment && is_affirmation(text) {
            info!("Session::submit: commitment affirmed, locking session");
            self.log.push(ConversationMessage::user(text));
            self.log.push(ConversationMessage::assistant(CLOSING_MESSAGE));
            self.is_locked = true;
            self.awaiting_commitment = false;
            return Ok(TurnOutcome::Locked);
        }

        self.log.push(ConversationMessage::user(text));
        self.has_started = true;

        let request = self.build_request();
        match self.llm.complete(request).await {
            Ok(response) => {
                let (prose, payload) = split_reply(&response.content);
                self.awaiting_commitment = prose.contains(COMMITMENT_QUESTION);
                self.log.push(ConversationMessage::assistant(prose));

                if let Some(payload) = payload {
                    debug!("Session::submit: state payload recovered");
                    self.state = SessionState::from_payload(&payload);
                    if let Some(fs) = FinalStrategy::from_state(&self.state) {
                        self.final_strategy = Some(fs);
                    }
                } else {
                    debug!("Session::submit: no state payload, conversation-only turn");
                }

                self.last_error = None;
                Ok(TurnOutcome::Replied)
            }
            Err(e) => {
                // Turn-scoped failure: state and strategy stay untouched,
                // the session remains active and the user may resend
                let message = e.to_string();
                if e.is_config() {
                    warn!(error = %message, "Session::submit: backend rejected configuration, resend will not help");
                } else {
                    warn!(error = %message, "Session::submit: backend call failed");
                }
                self.log
                    .push(ConversationMessage::assistant(format!("Error calling the model: {}", message)));
                self.last_error = Some(message.clone());
                Ok(TurnOutcome::Failed { message })
            }
        }
    }

    /// Build the backend request: system prompt + mode suffix, user and
    /// assistant turns only
    fn build_request(&self) -> CompletionRequest {
        let system_prompt = format!("{}{}", self.system_prompt, self.mode.suffix());
        let messages = self
            .log
            .iter()
            .filter_map(|m| match m.role {
                MessageRole::User => Some(Message::user(m.content.clone())),
                MessageRole::Assistant => Some(Message::assistant(m.content.clone())),
                MessageRole::System => None,
            })
            .collect();

        CompletionRequest {
            system_prompt,
            messages,
            max_tokens: REPLY_MAX_TOKENS,
        }
    }

    /// Switch the session mode (rejected once locked)
    pub fn set_mode(&mut self, mode: SessionMode) -> Result<(), SessionError> {
        if self.is_locked {
            return Err(SessionError::Locked);
        }
        debug!(%mode, "Session::set_mode: called");
        self.mode = mode;
        Ok(())
    }

    /// Reset to a fresh session (mode is collaborator configuration and
    /// survives)
    pub fn reset(&mut self) {
        info!("Session::reset: called");
        self.log = Self::seeded_log(&self.system_prompt);
        self.state = SessionState::default();
        self.final_strategy = None;
        self.has_started = false;
        self.is_locked = false;
        self.awaiting_commitment = false;
        self.last_error = None;
    }

    // Read-only snapshots for the rendering collaborator

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn log(&self) -> &[ConversationMessage] {
        &self.log
    }

    /// Log without the leading system message
    pub fn transcript(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.log.iter().filter(|m| m.role != MessageRole::System)
    }

    pub fn final_strategy(&self) -> Option<&FinalStrategy> {
        self.final_strategy.as_ref()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn awaiting_commitment(&self) -> bool {
        self.awaiting_commitment
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
