use async_trait::async_trait;

use super::poll::print_outcome;
use super::{Command, CommandContext, CommandResult, report};

pub struct SubmitCommand;

#[async_trait]
impl Command for SubmitCommand {
    fn name(&self) -> &str {
        "/submit"
    }

    fn description(&self) -> &str {
        "submit the uploaded file for review and poll once"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        match ctx.client.submit_and_poll_once(ctx.session).await {
            Ok(submission) => {
                println!("  ✓ task submitted: {}", submission.task_id);
                match submission.first_poll {
                    Ok(outcome) => print_outcome(&outcome),
                    Err(e) => report(&e),
                }
            }
            Err(e) => report(&e),
        }
        CommandResult::Handled
    }
}
