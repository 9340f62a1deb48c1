//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::config::{OutputConfig, ReplConfig};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use seismic_application::ChatSession;
use std::path::PathBuf;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Tools,
    Context,
    Reset,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/tools" => ReplCommand::Tools,
            "/context" | "/ctx" => ReplCommand::Context,
            "/reset" | "/clear" => ReplCommand::Reset,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: ChatSession,
    repl_config: ReplConfig,
    output_config: OutputConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            repl_config: ReplConfig::default(),
            output_config: OutputConfig::default(),
        }
    }

    pub fn with_repl_config(mut self, config: ReplConfig) -> Self {
        self.repl_config = config;
        self
    }

    pub fn with_output_config(mut self, config: OutputConfig) -> Self {
        self.output_config = config;
        self
    }

    /// Run the interactive REPL
    pub fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path: Option<PathBuf> = self.repl_config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if self.repl_config.show_welcome {
            self.print_welcome();
        }

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_message(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Seismic Chat - Chat Mode          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Tools: {}",
            self.session.registry().names().collect::<Vec<_>>().join(", ")
        );
        println!();
        println!("Try: \"Create a 30 Hz Ricker wavelet\", then \"plot it\"");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /tools            - List available tools");
        println!("  /context          - Show what the conversation remembers");
        println!("  /reset            - Forget the conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Tools => {
                println!("{}", ConsoleFormatter::format_tools(self.session.registry()));
            }
            ReplCommand::Context => {
                println!("{}", ConsoleFormatter::format_context(self.session.context()));
            }
            ReplCommand::Reset => {
                self.session.reset();
                println!("Conversation cleared.");
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn process_message(&mut self, message: &str) {
        println!();
        let reply = self.session.send(message);
        if self.output_config.is_json() {
            println!("{}", ConsoleFormatter::format_json(&reply));
        } else {
            println!("{}", ConsoleFormatter::format_reply(&reply));
        }
    }
}
