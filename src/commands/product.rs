use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult, report};
use crate::review::ProductType;

pub struct ProductCommand;

#[async_trait]
impl Command for ProductCommand {
    fn name(&self) -> &str {
        "/product"
    }

    fn args(&self) -> &str {
        "[TYPE]"
    }

    fn description(&self) -> &str {
        "list product types, or choose one"
    }

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        if args.is_empty() {
            let current = ctx.session.product_type();
            for p in ProductType::ALL {
                let marker = if Some(p) == current { " ← current" } else { "" };
                println!("  {p}{marker}");
            }
            return CommandResult::Handled;
        }
        match args.parse::<ProductType>() {
            Ok(p) => {
                ctx.session.set_product_type(p);
                println!("  ✓ product type: {p}");
            }
            Err(e) => report(&e),
        }
        CommandResult::Handled
    }
}
