use anyhow::{bail, Result};
use clap::Parser;
use simq::config::{self, Config};
use simq::logging::{self, LogTarget};
use simq::search::fanout;
use simq::service::{HttpQuestionService, QuestionService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "simq",
    about = "Ask a question, see whether it has been asked before",
    version
)]
struct Args {
    /// Base URL of the question service (overrides config and SIMQ_SERVER_URL)
    #[arg(long)]
    server: Option<String>,

    /// Save --server to the config file
    #[arg(long, requires = "server")]
    remember: bool,

    /// Print questions similar to QUESTION and exit (no TUI)
    #[arg(short, long, value_name = "QUESTION", conflicts_with = "list")]
    check: Option<String>,

    /// Print every stored question and exit (no TUI)
    #[arg(short, long)]
    list: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file for the TUI (defaults to the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load();
    let server_url = config.resolve_server_url(args.server.as_deref());
    let base = match config::parse_base_url(&server_url) {
        Ok(url) => url,
        Err(e) => bail!(e),
    };

    if args.remember {
        config.server_url = base.to_string();
        match config.save() {
            Ok(()) => eprintln!("  Saved server to {}", Config::config_location()),
            Err(e) => eprintln!("  Warning: could not save config: {}", e),
        }
    }

    let one_shot = args.check.is_some() || args.list;
    let target = if one_shot {
        LogTarget::Stderr
    } else {
        match config.resolve_log_file(args.log_file.as_deref()) {
            Some(path) => LogTarget::File(path),
            None => LogTarget::Stderr,
        }
    };
    if let Err(e) = logging::init(&args.log_level, target) {
        eprintln!("  Warning: logging disabled: {:#}", e);
    }

    let service = HttpQuestionService::new(base)?;
    tracing::info!(server = service.base_url().as_str(), "starting");

    if let Some(question) = args.check {
        return print_similar(&service, &question).await;
    }
    if args.list {
        return print_all(&service).await;
    }

    let server_label = server_label(service.base_url());
    let service: Arc<dyn QuestionService> = Arc::new(service);
    simq::app::run_tui(config, service, server_label).await
}

/// One search plus fan-out, printed as `score text` lines.
async fn print_similar(service: &dyn QuestionService, question: &str) -> Result<()> {
    let candidates = service.similar(question).await?;
    if candidates.is_empty() {
        println!("No similar questions.");
        return Ok(());
    }

    let results = fanout::resolve_all(service, candidates).await;
    for row in results.rows() {
        match &row.text {
            Some(text) => println!("{} {}", row.display_score(), text),
            None => println!("{}", row.display_score()),
        }
    }
    Ok(())
}

async fn print_all(service: &dyn QuestionService) -> Result<()> {
    let questions = service.all_questions().await?;
    for question in &questions {
        println!("{}", question);
    }
    eprintln!("  {} questions", questions.len());
    Ok(())
}

/// Host and port for the header; the full URL is in the log.
fn server_label(url: &url::Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => url.to_string(),
    }
}
