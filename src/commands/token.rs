use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct TokenCommand;

#[async_trait]
impl Command for TokenCommand {
    fn name(&self) -> &str {
        "/token"
    }

    fn args(&self) -> &str {
        "<TOKEN>"
    }

    fn description(&self) -> &str {
        "set the API token for this session (kept in memory only)"
    }

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        if args.is_empty() {
            eprintln!("  ✗ usage: /token <TOKEN>");
            return CommandResult::Handled;
        }
        ctx.session.set_credential(args);
        println!("  ✓ token set");
        CommandResult::Handled
    }
}
