//! # msr
//!
//! Produces a monthly contributor status report. By default the report
//! covers the entire previous calendar month; `--start`/`--end` select an
//! explicit window. Group membership, data directories, and field aliases
//! come from `msr.json5`, searched for in the current directory and then in
//! `~/.config/msr`.
//!
//! The run is fully sequential: one user, one source, one request at a
//! time. Any unrecoverable condition (no data directory, exhausted
//! retries, malformed cached file) aborts the whole run.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lib_msr::{
    load_actions, read_config, summarize, ActivityClient, CacheStore, ReviewClient, SourceKind,
    SourcePairs, TimeWindow,
};

mod render;

// load .env files before anything else
use static_init::dynamic;

#[dynamic]
static DOTENV_INIT: () = {
    dotenvy::dotenv().ok();
};

/// Command-line arguments for `msr`.
#[derive(Parser, Debug)]
#[command(
    name = "msr",
    version,
    about = "Produce a monthly contributor status report. Defaults to the previous calendar month."
)]
struct Args {
    /// Path to the msr.json5 configuration file; defaults to searching `.`
    /// then `~/.config/msr`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reporting window start date (YYYY-MM-DD); requires --end.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Reporting window end date (YYYY-MM-DD); requires --start.
    #[arg(long)]
    end: Option<NaiveDate>,
}

fn setup_logging() -> std::io::Result<WorkerGuard> {
    // Get log level from environment variable or use default
    let log_level: String = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Get log directory from environment variable or use default
    let log_dir: String = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    std::fs::create_dir_all(&log_dir)?;

    // Rotate the log file daily; the report itself goes to stdout, so both
    // log writers stay off it.
    let file_appender = rolling::daily(&log_dir, "msr");
    let (non_blocking_appender, guard) = non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            fmt::layer()
                .with_writer(non_blocking_appender)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = setup_logging().context("failed to initialize logging")?;

    let cfg = read_config(args.config.as_deref())?;

    let window = match (args.start, args.end) {
        (Some(start), Some(end)) => TimeWindow::new(start, end)?,
        (None, None) => TimeWindow::previous_month(),
        _ => bail!("--start and --end must be given together"),
    };
    info!(start = %window.start, end = %window.end, users = cfg.users.len(), "reporting window resolved");

    let store = CacheStore::new(cfg.data.path.clone());
    let activity = ActivityClient::new(&cfg.apis.activity)?;
    let review = ReviewClient::new(&cfg.apis.review)?;

    let mut actions = Vec::new();
    let mut wip = Vec::new();
    let mut pairs = SourcePairs::new(&store, &activity, &review, &window, &cfg.users);
    while let Some(pair) = pairs.next_pair().await {
        let (activity_path, review_path) = pair?;
        actions.extend(load_actions(&activity_path, &cfg.fields, SourceKind::Activity)?);
        wip.extend(load_actions(&review_path, &cfg.gerrit, SourceKind::PendingReview)?);
    }

    let summary = summarize(&actions, &wip);
    print!(
        "{}",
        render::render_text(&window, &summary, &cfg.fields, &cfg.gerrit, &actions, &wip)?
    );
    Ok(())
}
