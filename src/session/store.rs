//! Keyed session store
//!
//! Each session key maps to its own isolated `Session` behind its own lock -
//! there is no process-wide conversation state. The outer map lock is held
//! only to look up or insert entries; the per-session lock is what callers
//! hold across the (potentially slow) backend call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::llm::LlmClient;

use super::orchestrator::{Session, SessionMode};

/// Store of independent coaching sessions keyed by session id
pub struct SessionStore {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    default_mode: SessionMode,
    sessions: Mutex<HashMap<String, Arc<tokio::sync::Mutex<Session>>>>,
}

impl SessionStore {
    /// Create a store that seeds new sessions from the given prompt and mode
    pub fn new(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>, default_mode: SessionMode) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            default_mode,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a session, creating a fresh one for an unknown key
    pub fn get_or_create(&self, key: &str) -> Arc<tokio::sync::Mutex<Session>> {
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        sessions
            .entry(key.to_string())
            .or_insert_with(|| {
                debug!(%key, "SessionStore::get_or_create: creating session");
                Arc::new(tokio::sync::Mutex::new(Session::new(
                    self.llm.clone(),
                    self.system_prompt.clone(),
                    self.default_mode,
                )))
            })
            .clone()
    }

    /// Drop a session entirely (full reset including mode)
    pub fn remove(&self, key: &str) -> bool {
        debug!(%key, "SessionStore::remove: called");
        self.sessions.lock().expect("session map poisoned").remove(key).is_some()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
