//! System prompt loading
//!
//! The coaching prompt is compiled into the binary from a .pmt file; a config
//! override path can replace it without rebuilding.

use eyre::{Context, Result};
use tracing::debug;

use crate::config::Config;

/// Embedded coaching system prompt
pub const COACH: &str = include_str!("../prompts/coach.pmt");

/// Resolve the system prompt: override file if configured, embedded otherwise
pub fn load_system_prompt(config: &Config) -> Result<String> {
    match &config.session.system_prompt_path {
        Some(path) => {
            debug!(path = %path.display(), "load_system_prompt: loading override");
            let content = std::fs::read_to_string(path)
                .context(format!("Failed to read system prompt from {}", path.display()))?;
            Ok(content.trim().to_string())
        }
        None => {
            debug!("load_system_prompt: using embedded prompt");
            Ok(COACH.trim().to_string())
        }
    }
}
