use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct ConfigCommand;

#[async_trait]
impl Command for ConfigCommand {
    fn name(&self) -> &str {
        "/config"
    }

    fn args(&self) -> &str {
        "[KEY [VALUE]]"
    }

    fn description(&self) -> &str {
        "list, read or change saved settings"
    }

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        let (key, value) = match args.split_once(char::is_whitespace) {
            Some((k, v)) => (k, v.trim()),
            None => (args, ""),
        };

        if key.is_empty() {
            match ctx.config.entries() {
                Ok(entries) if entries.is_empty() => println!("  (no saved settings)"),
                Ok(entries) => {
                    for (k, v) in entries {
                        println!("  {k:<13} {v}");
                    }
                }
                Err(e) => eprintln!("  ✗ {e:#}"),
            }
        } else if value.is_empty() {
            match ctx.config.get(key) {
                Ok(Some(v)) => println!("  {key} = {v}"),
                Ok(None) => println!("  {key} is not set"),
                Err(e) => eprintln!("  ✗ {e:#}"),
            }
        } else {
            match ctx.config.set(key, value) {
                Ok(()) => {
                    println!("  ✓ {key} saved");
                    println!("    takes effect next start");
                }
                Err(e) => eprintln!("  ✗ {e:#}"),
            }
        }
        CommandResult::Handled
    }
}
