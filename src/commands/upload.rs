use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult, report};

pub struct UploadCommand;

#[async_trait]
impl Command for UploadCommand {
    fn name(&self) -> &str {
        "/upload"
    }

    fn description(&self) -> &str {
        "upload the selected file"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        // One upload per session; /reset starts over.
        if let Some(url) = ctx.session.file_reference() {
            eprintln!("  ✗ file already uploaded: {url}");
            eprintln!("    use /reset to upload a different file");
            return CommandResult::Handled;
        }
        match ctx.client.upload_file(ctx.session).await {
            Ok(url) => println!("  ✓ uploaded: {url}"),
            Err(e) => report(&e),
        }
        CommandResult::Handled
    }
}
