//! REPL session management

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::session::{
    ConversationMessage, MessageRole, Phase, PhaseStep, Session, SessionError, SessionMode, TurnOutcome, phase_tracker,
};

/// Interactive coaching REPL
///
/// The rendering collaborator: reads snapshots from the session, turns
/// keystrokes into `submit`/`set_mode`/`reset` calls, and never touches
/// session internals.
pub struct ReplCoach {
    session: Arc<tokio::sync::Mutex<Session>>,
    /// Text pre-seeded into the next composer line (quick actions)
    pending_seed: Option<String>,
}

impl ReplCoach {
    /// Create a new REPL over an existing session
    pub fn new(session: Arc<tokio::sync::Mutex<Session>>) -> Self {
        Self {
            session,
            pending_seed: None,
        }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome().await;

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let prompt = format!("{} ", ">".bright_green());
            let seed = self.pending_seed.take().unwrap_or_default();
            let readline = rl.readline_with_initial(&prompt, (seed.as_str(), ""));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        // Empty submissions never reach the orchestrator
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Print welcome message, greeting, and the initial tracker
    async fn print_welcome(&self) {
        let session = self.session.lock().await;
        println!();
        println!("{}", "Marvin - Strategy Coach".bright_cyan().bold());
        println!("{}", "Good questions. Clear thinking. A strategy you can actually use.".dimmed());
        println!(
            "Mode: {}. Type {} for help, {} to quit.",
            session.mode().to_string().yellow(),
            "/help".yellow(),
            "/quit".yellow()
        );
        println!();
        if let Some(greeting) = session.transcript().next() {
            println!("{}", greeting.content);
        }
        println!();
        print_tracker(&phase_tracker(session.state()));
    }

    /// Handle slash commands
    async fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/reset" => {
                self.session.lock().await.reset();
                println!("{}", "Session reset.".dimmed());
                SlashResult::Continue
            }
            "/mode" => {
                self.handle_mode(parts.get(1).copied()).await;
                SlashResult::Continue
            }
            "/state" => {
                self.print_state().await;
                SlashResult::Continue
            }
            "/history" => {
                self.print_history().await;
                SlashResult::Continue
            }
            "/revise" => {
                self.handle_revise(parts.get(1).copied()).await;
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    async fn handle_mode(&self, arg: Option<&str>) {
        let Some(arg) = arg else {
            let mode = self.session.lock().await.mode();
            println!("Current mode: {}", mode.to_string().yellow());
            return;
        };

        let Some(mode) = SessionMode::parse(arg) else {
            println!("{} Unknown mode: {} (use workshop or board)", "?".yellow(), arg);
            return;
        };

        match self.session.lock().await.set_mode(mode) {
            Ok(()) => println!("Mode set to {}.", mode.to_string().yellow()),
            Err(e) => println!("{} {}", "!".red(), e),
        }
    }

    /// Quick action: pre-seed the composer to reopen a strategy component
    async fn handle_revise(&mut self, arg: Option<&str>) {
        if self.session.lock().await.is_locked() {
            println!("{}", "Session complete. Use /reset to start again.".yellow());
            return;
        }
        match arg {
            Some(part @ ("objective" | "scope" | "advantage")) => {
                let mut seed = String::from("Revise ");
                seed.push_str(part);
                seed.push_str(": ");
                self.pending_seed = Some(seed);
            }
            _ => println!("Usage: /revise <objective|scope|advantage>"),
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:22} Show this help", "/help".yellow());
        println!("  {:22} Exit the coach", "/quit".yellow());
        println!("  {:22} Start the session over", "/reset".yellow());
        println!("  {:22} Show or switch the session mode", "/mode [workshop|board]".yellow());
        println!("  {:22} Show the working strategy", "/state".yellow());
        println!("  {:22} Show the conversation so far", "/history".yellow());
        println!("  {:22} Reopen a strategy component", "/revise <part>".yellow());
        println!();
    }

    /// Print the working strategy panel
    async fn print_state(&self) {
        let session = self.session.lock().await;
        let state = session.state();

        println!();
        println!("{}", "Current focus".bright_cyan());
        println!("  {}", state.current_phase.label().bold());

        println!("{}", "Working Strategy".bright_cyan());
        print_field("Objective", &state.objective);
        print_field("Scope", &state.scope);
        print_field("Advantage", &state.advantage);

        // Assumptions surface once the statement phases begin
        if !state.strategic_assumptions.is_empty() && matches!(state.current_phase, Phase::Draft | Phase::Refine) {
            println!("  {}", "Assumptions".bold());
            for a in &state.strategic_assumptions {
                println!("    - {}", a);
            }
        }

        if let Some(fs) = session.final_strategy() {
            println!("{}", "Final Strategy".bright_cyan());
            if !fs.draft.is_empty() {
                print_field("Draft", &fs.draft);
            }
            if !fs.refined.is_empty() {
                print_field("Refined", &fs.refined);
            }
            for a in &fs.assumptions {
                println!("    - {}", a);
            }
        }

        if let Some(err) = session.last_error() {
            println!("{} {}", "Last error:".red(), err);
        }
        println!();
    }

    /// Print the conversation transcript (system message excluded)
    async fn print_history(&self) {
        let session = self.session.lock().await;
        let transcript: Vec<&ConversationMessage> = session.transcript().collect();

        if transcript.is_empty() {
            println!("{}", "No conversation yet.".dimmed());
            return;
        }

        println!();
        for msg in transcript {
            match msg.role {
                MessageRole::Assistant => {
                    println!("{}", "MARVIN".bright_blue().bold());
                    println!("{}", msg.content);
                }
                MessageRole::User => {
                    println!("{}", "YOU".dimmed().bold());
                    println!("{}", msg.content.italic());
                }
                MessageRole::System => {}
            }
            println!();
        }
    }

    /// Submit a message and render the outcome
    async fn process_user_input(&mut self, input: &str) {
        let mut session = self.session.lock().await;

        match session.submit(input).await {
            Ok(TurnOutcome::Replied) => {
                if let Some(reply) = session.transcript().last() {
                    println!();
                    println!("{}", reply.content);
                    println!();
                }
                print_tracker(&phase_tracker(session.state()));
            }
            Ok(TurnOutcome::Locked) => {
                println!();
                if let Some(reply) = session.transcript().last() {
                    println!("{}", reply.content);
                }
                println!();
                println!("{}", "Session complete. Use /reset to start again.".yellow());
            }
            Ok(TurnOutcome::Failed { message }) => {
                println!();
                println!("{} {}", "Error calling the model:".red(), message);
                println!("{}", "Your session is intact - you can resend.".dimmed());
            }
            Err(SessionError::Locked) => {
                println!("{}", "Session complete. Use /reset to start again.".yellow());
            }
            Err(SessionError::EmptyMessage) => {}
        }
    }
}

fn print_field(label: &str, value: &str) {
    let display = if value.is_empty() { "-" } else { value };
    println!("  {:10} {}", label.bold(), display);
}

/// Render the five-phase tracker on one line
fn print_tracker(steps: &[PhaseStep]) {
    let rendered: Vec<String> = steps
        .iter()
        .map(|step| {
            if step.done {
                format!("[{}] {}", "✓".green(), step.label.green())
            } else if step.current {
                format!("[{}] {}", ">".bright_blue(), step.label.bright_blue().bold())
            } else {
                format!("[ ] {}", step.label.dimmed())
            }
        })
        .collect();
    println!("{}", rendered.join("  "));
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
