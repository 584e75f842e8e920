//! user-replay - Replay user store actions and print the resulting views

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use libuserstore::logging::LoggingConfig;
use libuserstore::script::{self, RunSummary};
use libuserstore::config::resolve_config_path;
use libuserstore::{selectors, Config, Store, User, UserId, UserQuery, UserState, UserStoreError};

#[derive(Parser, Debug)]
#[command(name = "user-replay")]
#[command(version, about = "Replay a script of user store actions")]
#[command(long_about = r#"Feed a JSON-lines script of actions through a user store and print the
resulting views.

Each non-blank line is either a bare action or a resolution addressed to an
earlier request. Requests are numbered from 1 in script order. Lines starting
with '#' are comments.

EXAMPLES:
    # Replay a script file
    user-replay session.jsonl

    # Read from stdin
    printf '%s\n' '{"type":"search_request"}' | user-replay

    # Resolve request 1 after request 2 superseded it (dropped as stale)
    cat <<'EOF' | user-replay --format json
    {"type": "search_request"}
    {"type": "search_request"}
    {"token": 1, "action": {"type": "search_fail", "error": "timeout"}}
    EOF

    # Apply every resolution, even superseded ones
    user-replay --no-track session.jsonl

EXIT CODES:
    0 - Success
    1 - Error (unreadable input, bad config, token misuse)
    3 - Invalid script line
"#)]
struct Args {
    /// Script file; reads stdin when omitted or "-"
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json"])]
    format: String,

    /// Config file (defaults to $USERSTORE_CONFIG or ~/.config/userstore/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Apply resolutions of superseded requests instead of dropping them
    #[arg(long)]
    no_track: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Everything the view layer exposes, plus replay counters
#[derive(Debug, Serialize)]
struct StoreView<'a> {
    users: Vec<&'a User>,
    selected_id: Option<UserId>,
    loading: bool,
    error: &'a str,
    query: &'a UserQuery,
    summary: RunSummary,
}

impl<'a> StoreView<'a> {
    fn new(state: &'a UserState, summary: RunSummary) -> Self {
        Self {
            users: selectors::iter_users(state).collect(),
            selected_id: selectors::selected_id(state),
            loading: selectors::loading(state),
            error: selectors::error(state),
            query: selectors::query(state),
            summary,
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<UserStoreError>()
            .map(UserStoreError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if args.no_track {
        config.dispatch.track_requests = false;
    }
    LoggingConfig::from_section(&config.logging, args.verbose).init();
    log_config_source(args.config.as_deref(), &config);

    let input = read_script(args.script.as_ref())?;
    let steps = script::parse(&input)?;

    let mut store = Store::from_config(&config.dispatch);
    tracing::debug!(
        steps = steps.len(),
        track_requests = store.tracks_requests(),
        "Replaying script"
    );

    let summary = script::run(&mut store, steps)?;
    tracing::info!(
        steps = summary.steps,
        requests = summary.requests,
        applied = summary.applied,
        stale = summary.stale,
        "Replay finished"
    );

    let view = StoreView::new(store.state(), summary);
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&view)?),
        _ => print_text(&view),
    }

    Ok(())
}

/// Report where the configuration came from once logging is up
fn log_config_source(explicit: Option<&Path>, config: &Config) {
    let track_requests = config.dispatch.track_requests;
    match explicit {
        Some(path) => {
            tracing::debug!(path = %path.display(), track_requests, "Loaded config");
        }
        None => match resolve_config_path() {
            Ok(path) if path.exists() => {
                tracing::debug!(path = %path.display(), track_requests, "Loaded config");
            }
            Ok(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
            }
            Err(e) => tracing::debug!("No config directory, using defaults: {}", e),
        },
    }
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read script from stdin")?;
            Ok(input)
        }
    }
}

fn print_text(view: &StoreView<'_>) {
    println!("Users ({}):", view.users.len());
    for user in &view.users {
        println!(
            "  {:>6}  {} {} ({})",
            user.id, user.first_name, user.last_name, user.user_name
        );
    }

    println!("Selected: {}", or_dash(view.selected_id));
    println!("Loading: {}", view.loading);
    println!(
        "Error: {}",
        if view.error.is_empty() { "-" } else { view.error }
    );
    println!(
        "Query: filter={:?} sort={:?} order={} limit={} page={}",
        view.query.filter,
        view.query.sort,
        view.query.order,
        or_dash(view.query.limit),
        or_dash(view.query.page),
    );
    println!(
        "Replayed {} steps ({} requests, {} applied, {} stale)",
        view.summary.steps, view.summary.requests, view.summary.applied, view.summary.stale
    );
}

fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
