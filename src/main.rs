mod app;
mod config;
mod demo;
mod script;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "hash-academy")]
#[command(version)]
#[command(about = "Play with insert, search and delete on a five-slot hash table")]
struct Args {
    /// Replay operations from a file instead of starting the TUI
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print script results as JSON
    #[arg(short, long, requires = "script")]
    json: bool,

    /// Print the hash and slot index of a key
    #[arg(long, value_name = "KEY")]
    hash: Option<String>,

    /// Use this config file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr keeps the TUI intact)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle CLI-only commands
    if let Some(key) = args.hash {
        return print_hash(&key);
    }

    if let Some(path) = args.script {
        let config = AppConfig::load(args.config.as_deref())?;
        return run_script(&path, args.json, &config).await;
    }

    // Run TUI
    let config = AppConfig::load(args.config.as_deref())?;
    run_tui(config).await
}

fn print_hash(key: &str) -> Result<()> {
    println!("{}", hash_line(key)?);
    Ok(())
}

fn hash_line(key: &str) -> Result<String> {
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Key must not be empty");
    }
    Ok(format!(
        "hash({:?}) = {} → index {}",
        key,
        demo::hash::hash(key),
        demo::hash::index(key)
    ))
}

async fn run_script(path: &std::path::Path, json: bool, config: &AppConfig) -> Result<()> {
    let report = script::run_file(path, config.language).await?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

async fn run_tui(config: AppConfig) -> Result<()> {
    tracing::info!("HASH ACADEMY starting");
    ui::init_theme(theme::Theme::load(&config.theme));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        // Expire highlight and status
        app.tick();
    }
}
