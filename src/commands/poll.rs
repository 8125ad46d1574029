use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult, report};
use crate::render::format_findings;
use crate::review::PollOutcome;

pub struct PollCommand;

#[async_trait]
impl Command for PollCommand {
    fn name(&self) -> &str {
        "/poll"
    }

    fn description(&self) -> &str {
        "query the submitted task once"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        match ctx.client.poll_task(ctx.session).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => report(&e),
        }
        CommandResult::Handled
    }
}

pub(super) fn print_outcome(outcome: &PollOutcome) {
    match outcome {
        PollOutcome::Resolved(findings) => {
            println!("  ✓ review finished, {} result(s)", findings.len());
            print!("{}", format_findings(findings));
        }
        PollOutcome::Pending(status) => {
            println!("  task status: {status}");
            println!("  run /poll again later");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ReviewResults, TaskResponse, TaskResult};
    use crate::commands::tests::Harness;
    use crate::review::Finding;

    #[tokio::test]
    async fn without_task_id_sends_nothing() {
        let mut h = Harness::authed();
        PollCommand.execute("", &mut h.ctx()).await;
        assert_eq!(h.mock.task_calls(), 0);
    }

    #[test]
    fn print_outcome_does_not_panic() {
        print_outcome(&PollOutcome::Pending(crate::review::TaskStatus::new("PENDING")));
        print_outcome(&PollOutcome::Resolved(vec![Finding::default()]));
    }

    #[tokio::test]
    async fn resolved_poll_via_submit_stores_findings() {
        let mut h = Harness::authed();
        h.session.set_pending_file(crate::review::FilePayload::new("x.pdf", vec![1]));
        h.session.set_product_type(crate::review::ProductType::Alcohol);
        h.mock
            .push_upload(Ok(crate::api::UploadResponse {
                url: "https://store/x.pdf".into(),
            }))
            .push_submit(Ok(crate::api::SubmitResponse {
                task_id: "T-1".into(),
            }))
            .push_task(Ok(TaskResponse {
                status: "PENDING".into(),
                result: None,
            }))
            .push_task(Ok(TaskResponse {
                status: "SUCCESS".into(),
                result: Some(TaskResult {
                    review_results: Some(ReviewResults {
                        text: Some(vec![Finding::default(), Finding::default()]),
                    }),
                }),
            }));
        let client = h.client.clone();
        client.upload_file(&mut h.session).await.unwrap();
        client.submit_and_poll_once(&mut h.session).await.unwrap();
        assert!(h.session.findings().is_empty());

        PollCommand.execute("", &mut h.ctx()).await;

        assert_eq!(h.session.findings().len(), 2);
        assert_eq!(h.mock.last_task_id().as_deref(), Some("T-1"));
    }
}
