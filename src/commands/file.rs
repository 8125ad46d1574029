use std::path::Path;

use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};
use crate::review::FilePayload;

pub struct FileCommand;

#[async_trait]
impl Command for FileCommand {
    fn name(&self) -> &str {
        "/file"
    }

    fn args(&self) -> &str {
        "<PATH>"
    }

    fn description(&self) -> &str {
        "select the local file to upload"
    }

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        if args.is_empty() {
            eprintln!("  ✗ usage: /file <PATH>");
            return CommandResult::Handled;
        }
        match FilePayload::read(Path::new(args)).await {
            Ok(file) => {
                if file.is_empty() {
                    eprintln!("  ! {} is empty and cannot be uploaded", file.name);
                } else {
                    println!("  ✓ selected {} ({} bytes)", file.name, file.len());
                }
                ctx.session.set_pending_file(file);
            }
            Err(e) => eprintln!("  ✗ {e:#}"),
        }
        CommandResult::Handled
    }
}
