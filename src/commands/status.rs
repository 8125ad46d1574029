use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};
use crate::render::{format_findings, format_status};

pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show the session: stage, file, task id, last status"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        print!("{}", format_status(ctx.session));
        CommandResult::Handled
    }
}

pub struct ResultsCommand;

#[async_trait]
impl Command for ResultsCommand {
    fn name(&self) -> &str {
        "/results"
    }

    fn description(&self) -> &str {
        "show the findings of the finished review"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        print!("{}", format_findings(ctx.session.findings()));
        CommandResult::Handled
    }
}
