//! Interactive coaching REPL

mod session;

pub use session::ReplCoach;

use eyre::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::llm::create_client;
use crate::prompts::load_system_prompt;
use crate::session::{SessionMode, SessionStore};

/// Run the interactive coaching session
pub async fn run_interactive(config: Config, mode_override: Option<SessionMode>) -> Result<()> {
    info!("run_interactive: starting REPL");

    config.validate()?;

    let client = create_client(&config.llm).context("Failed to create LLM client")?;
    let system_prompt = load_system_prompt(&config)?;
    let mode = mode_override.unwrap_or(config.session.mode);

    let store = SessionStore::new(client, system_prompt, mode);
    let session = store.get_or_create("local");

    let mut repl = ReplCoach::new(session);
    repl.run().await
}
