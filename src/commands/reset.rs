use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct ResetCommand;

#[async_trait]
impl Command for ResetCommand {
    fn name(&self) -> &str {
        "/reset"
    }

    fn aliases(&self) -> &[&str] {
        &["/new"]
    }

    fn description(&self) -> &str {
        "start over with a new file (keeps the token)"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        ctx.session.reset();
        println!("  ✓ session cleared");
        CommandResult::Handled
    }
}
