use bluesky_client::BlueskyClient;
use clap::Parser;
use skyfollows_core::{
    render_lists, render_report, AppConfig, CoreError, ErrorExt, ErrorReporter, OutputFormat,
    Outcome, RecommendRequest, Recommender, Stage,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Find accounts the members of one of your Bluesky lists follow, that you don't follow yet.
#[derive(Parser, Debug)]
#[command(name = "skyfollows")]
#[command(version, about)]
struct Cli {
    /// Bluesky handle, e.g. alice.bsky.social
    #[arg(long)]
    username: String,

    /// List name; omit to print the available lists
    #[arg(long)]
    list: Option<String>,

    /// Print JSON instead of text
    #[arg(short, long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Drop accounts followed this many times or fewer
    #[arg(long)]
    min_count: Option<u32>,

    /// TOML configuration file
    #[arg(long, env = "SKYFOLLOWS_CONFIG")]
    config: Option<PathBuf>,

    /// App password; when set, requests are authenticated
    #[arg(long, env = "BSKY_APP_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if is_usage_error(&e) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "skyfollows={0},skyfollows_core={0},bluesky_client={0}",
                default_level
            ))
        }))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_reporter(cli.verbose).report_error(&e);
            eprintln!("❌ {}", e.user_friendly_message());
            ExitCode::FAILURE
        }
    }
}

/// `--help` and `--version` also arrive as clap errors; only real usage
/// mistakes are failures.
fn is_usage_error(e: &clap::Error) -> bool {
    e.use_stderr()
}

/// Structured error logs only with `--verbose`; the user message is always printed.
fn error_reporter(verbose: bool) -> ErrorReporter {
    ErrorReporter::new()
        .with_error_reporting(verbose)
        .with_warning_reporting(verbose)
}

async fn run(cli: &Cli) -> Result<(), CoreError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(min_count) = cli.min_count {
        config.min_count = min_count;
    }

    let mut client = BlueskyClient::new(&config)?;
    if let Some(password) = &cli.password {
        client
            .login(&cli.username, password)
            .await
            .map_err(|e| e.in_stage(Stage::Authenticate))?;
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let request = RecommendRequest {
        username: cli.username.clone(),
        list_name: cli.list.clone(),
    };

    let outcome = Recommender::new(&client, &config).run(&request).await;

    if cli.verbose {
        tracing::info!("API usage: {}", client.get_api_metrics().await.summary());
    }

    let output = match outcome? {
        Outcome::Lists(lists) => render_lists(&cli.username, &lists, format)?,
        Outcome::Report { entries, .. } => render_report(&entries, format)?,
    };

    match format {
        OutputFormat::Text => print!("{}", output),
        OutputFormat::Json => println!("{}", output),
    }
    Ok(())
}
