//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`], which handles dispatch, alias resolution and help
//! text. Each command gets the raw argument string and a [`CommandContext`]
//! lending it the session, the client and the settings store.

mod config;
mod file;
mod poll;
mod product;
mod quit;
mod reset;
mod status;
mod submit;
mod token;
mod upload;

use async_trait::async_trait;
use std::sync::Arc;

use crate::client::TaskClient;
use crate::config::Config;
use crate::error::ClientError;
use crate::session::Session;

/// Everything a command may read or change.
pub struct CommandContext<'a> {
    pub session: &'a mut Session,
    pub client: &'a TaskClient,
    pub config: &'a Config,
}

/// What the REPL should do after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Input was not a command.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Exit the REPL.
    Quit,
}

#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/upload"`.
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Argument synopsis shown in help, e.g. `"<PATH>"`.
    fn args(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> CommandResult;
}

pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(token::TokenCommand),
            Arc::new(file::FileCommand),
            Arc::new(product::ProductCommand),
            Arc::new(upload::UploadCommand),
            Arc::new(submit::SubmitCommand),
            Arc::new(poll::PollCommand),
            Arc::new(status::StatusCommand),
            Arc::new(status::ResultsCommand),
            Arc::new(reset::ResetCommand),
            Arc::new(config::ConfigCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        let input = input.trim();
        let (cmd, args) = input
            .split_once(char::is_whitespace)
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((input, ""));

        if matches!(cmd, "/help" | "/h" | "/?") {
            print!("{}", self.help_text());
            return CommandResult::Handled;
        }

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                return command.execute(args, ctx).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let mut entries: Vec<(String, &str)> = vec![(
            format_label("/help", "", &["/h", "/?"]),
            "show this help",
        )];
        entries.extend(
            self.commands
                .iter()
                .map(|c| (format_label(c.name(), c.args(), c.aliases()), c.description())),
        );

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = vec!["/help", "/h", "/?"];
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, args: &str, aliases: &[&str]) -> String {
    let mut label = name.to_string();
    if !args.is_empty() {
        label.push(' ');
        label.push_str(args);
    }
    if !aliases.is_empty() {
        label.push_str(&format!(" ({})", aliases.join(", ")));
    }
    label
}

/// Print a client failure with its hint.
pub(crate) fn report(err: &ClientError) {
    eprintln!("  ✗ {err}");
    eprintln!("    {}", err.hint());
}
