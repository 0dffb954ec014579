//! dbtui - a keyboard-driven relational database browser for the terminal
//!
//! Entry point: argument parsing, logging setup, terminal lifecycle, and
//! the event loop. The actual logic lives in the library modules.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use dbtui::app::Session;
use dbtui::config;
use dbtui::db::adapter::EngineConnector;
use dbtui::error::StartupError;
use dbtui::ui::{render, theme::Theme};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

/// A keyboard-driven relational database browser for the terminal
#[derive(Parser, Debug)]
#[command(name = "dbtui", version, about)]
struct Args {
    /// Path to the server catalog (default: ~/.dbtui/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append structured logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path)
    {
        eprintln!("dbtui: cannot open log file: {}", e);
        return ExitCode::from(1);
    }

    let session = match startup(&args).await {
        Ok(session) => session,
        Err(e @ StartupError::Config(_)) => {
            eprintln!("dbtui: {}", e);
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("dbtui: {}", e);
            return ExitCode::from(2);
        }
    };

    match run(session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dbtui: {}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Load the server catalog and build the initial session
async fn startup(args: &Args) -> Result<Session, StartupError> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let servers = config::load_servers(&path)?;
    info!(path = %path.display(), servers = servers.len(), "catalog loaded");
    Session::init(servers, Box::new(EngineConnector)).await
}

/// Terminal lifecycle plus the event loop: draw, read, handle, dispatch.
async fn run(mut session: Session) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let theme = Theme::new();

    let mut result = Ok(());
    while session.running {
        if let Err(e) = terminal.draw(|frame| render::render(frame, &session, &theme)) {
            result = Err(e).context("draw frame");
            break;
        }

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = session.handle_key(key);
                session.dispatch(action).await;
            }
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}
