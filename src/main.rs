use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use adreview::api::http::HttpReviewApi;
use adreview::banner::{BannerInfo, print_banner, print_session_summary};
use adreview::client::TaskClient;
use adreview::commands::{CommandContext, CommandRegistry, CommandResult};
use adreview::config::Config;
use adreview::consts::{BASE_URL_ENV, TOKEN_ENV, default_db_path};
use adreview::error::ClientError;
use adreview::logging;
use adreview::render::format_findings;
use adreview::review::{FilePayload, PollOutcome, ProductType};
use adreview::session::Session;

#[derive(Parser)]
#[command(
    name = "adreview",
    version,
    about = "Upload a document, submit it for review and poll for findings."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// API bearer token (held in memory, never saved)
    #[arg(short, long, env = TOKEN_ENV, hide_env_values = true, global = true)]
    token: Option<String>,

    /// Review service base URL
    #[arg(long, env = BASE_URL_ENV, global = true)]
    base_url: Option<String>,

    /// SQLite settings database (default: ~/.adreview/adreview.db)
    #[arg(short, long, global = true)]
    db: Option<PathBuf>,

    /// Transport timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a file and print its URL
    Upload { file: PathBuf },
    /// Submit an uploaded file URL for review
    Submit {
        file_url: String,
        /// alcohol, ordinary-food or health-food
        #[arg(short, long)]
        product: Option<ProductType>,
        /// Do not poll after submitting
        #[arg(long, default_value_t = false)]
        no_poll: bool,
    },
    /// Query a task once
    Poll { task_id: String },
    /// Upload, submit and poll once
    Review {
        file: PathBuf,
        /// alcohol, ordinary-food or health-food
        #[arg(short, long)]
        product: Option<ProductType>,
    },
    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// List saved settings
    List,
    /// Print one setting
    Get { key: String },
    /// Save a setting (base_url, product_type)
    Set { key: String, value: String },
    /// Remove a setting
    Unset { key: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let db_path = cli.db.clone().unwrap_or_else(default_db_path);
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let db_label = db_path.to_string_lossy().into_owned();
    let config = Config::open(&db_label)?;

    let base_url = config.base_url(cli.base_url.as_deref())?;
    let timeout = cli.timeout.map(Duration::from_secs);
    let api = HttpReviewApi::new(base_url.clone(), timeout)
        .context("failed to build HTTP client")?;
    let client = TaskClient::new(Arc::new(api));

    let token = cli.token.as_deref().unwrap_or_default().trim().to_string();

    match cli.command {
        Some(Command::Upload { file }) => {
            let file = FilePayload::read(&file).await?;
            let url = client.upload(&token, Some(&file)).await.map_err(fail)?;
            println!("{url}");
            Ok(())
        }
        Some(Command::Submit {
            file_url,
            product,
            no_poll,
        }) => {
            let task_id = client
                .submit(&token, &file_url, product.or(config.default_product_type()?))
                .await
                .map_err(fail)?;
            println!("task id: {task_id}");
            if !no_poll {
                let outcome = client.poll(&token, &task_id).await.map_err(fail)?;
                print_outcome(&outcome);
            }
            Ok(())
        }
        Some(Command::Poll { task_id }) => {
            let outcome = client.poll(&token, &task_id).await.map_err(fail)?;
            print_outcome(&outcome);
            Ok(())
        }
        Some(Command::Review { file, product }) => {
            let mut session = Session::with_credential(token);
            session.set_pending_file(FilePayload::read(&file).await?);
            if let Some(product) = product.or(config.default_product_type()?) {
                session.set_product_type(product);
            }
            let url = client.upload_file(&mut session).await.map_err(fail)?;
            println!("file url: {url}");
            let submission = client
                .submit_and_poll_once(&mut session)
                .await
                .map_err(fail)?;
            println!("task id: {}", submission.task_id);
            print_outcome(&submission.first_poll.map_err(fail)?);
            Ok(())
        }
        Some(Command::Config { action }) => handle_config(&config, &action),
        None => {
            let default_product = config.default_product_type()?;
            let mut session = Session::with_credential(token);
            if let Some(product) = default_product {
                session.set_product_type(product);
            }
            let token_status = if session.has_credential() {
                "set"
            } else {
                "not set (use /token)"
            };
            let product_label = default_product
                .map(|p| p.to_string())
                .unwrap_or_else(|| "not chosen (use /product)".to_string());
            print_banner(&BannerInfo {
                base_url: &base_url,
                token_status,
                product_type: &product_label,
                config_db: &db_label,
            });
            repl(&client, &config, &mut session).await?;
            print_session_summary(&session);
            Ok(())
        }
    }
}

async fn repl(client: &TaskClient, config: &Config, session: &mut Session) -> anyhow::Result<()> {
    let registry = CommandRegistry::new();

    // Async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nadreview> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut ctx = CommandContext {
            session: &mut *session,
            client,
            config,
        };

        // Ctrl+C during a request stops waiting for it; the request itself is not recalled.
        let result = tokio::select! {
            result = registry.dispatch(input, &mut ctx) => result,
            _ = tokio::signal::ctrl_c() => {
                println!("\n\ninterrupted");
                CommandResult::Handled
            }
        };

        match result {
            CommandResult::Quit => break,
            CommandResult::NotACommand => println!("type /help for available commands"),
            CommandResult::Handled => {}
        }
    }
    Ok(())
}

fn handle_config(config: &Config, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::List => {
            for (key, value) in config.entries()? {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Get { key } => match config.get(key)? {
            Some(value) => println!("{value}"),
            None => anyhow::bail!("{key} is not set"),
        },
        ConfigAction::Set { key, value } => config.set(key, value)?,
        ConfigAction::Unset { key } => config.remove(key)?,
    }
    Ok(())
}

fn print_outcome(outcome: &PollOutcome) {
    match outcome {
        PollOutcome::Resolved(findings) => {
            println!("status: SUCCESS ({} result(s))", findings.len());
            print!("{}", format_findings(findings));
        }
        PollOutcome::Pending(status) => println!("status: {status}"),
    }
}

/// Turn a client failure into a CLI error carrying the actionable hint.
fn fail(err: ClientError) -> anyhow::Error {
    let hint = err.hint();
    anyhow!(err).context(hint)
}
