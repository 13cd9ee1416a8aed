//! NightOwl - midnight vendor/event finder TUI.
//!
//! Flow: terminal events -> shell maps them to actions -> effect store
//! dispatches through the reducer -> declared effects become keyed tasks
//! (network) or subscriptions (position watch) -> results come back as
//! actions -> re-render on change.

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use nightowl::components::AppUi;
use nightowl::effects::EffectHandler;
use nightowl::runtime::Runtime;
use nightowl_api::{ApiClient, ApiConfig, GeocodeClient, PositionConfig};
use nightowl_core::{Action, AppState, Coordinate, EffectStore};

/// Midnight vendor/event finder.
#[derive(Parser, Debug)]
#[command(name = "nightowl")]
#[command(about = "Browse and host midnight vendors and events on a live map")]
struct Args {
    /// Backend base URL
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Reverse-geocoder base URL (nominatim-compatible)
    #[arg(long, default_value = ApiConfig::DEFAULT_GEOCODE_URL)]
    geocode_url: String,

    /// Position source URL (JSON endpoint with lat/lon)
    #[arg(long, default_value = PositionConfig::DEFAULT_URL)]
    position_url: String,

    /// Position poll interval in seconds
    #[arg(long, default_value = "30")]
    position_interval: u64,

    /// Listing feed refresh interval in seconds
    #[arg(long, short, default_value = "120")]
    refresh_interval: u64,

    /// Fallback map center latitude
    #[arg(long, default_value = "28.6139")]
    default_lat: f64,

    /// Fallback map center longitude
    #[arg(long, default_value = "77.2090")]
    default_lng: f64,

    /// Write logs to this file (the terminal owns stdout)
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

const LOADING_ANIM_TICK_MS: u64 = 120;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // An unusable default center is a configuration error, caught here
    // and never a runtime state.
    let default_center = Coordinate::new(args.default_lat, args.default_lng);
    if !default_center.is_valid() {
        eprintln!(
            "Error: --default-lat/--default-lng out of range: {default_center}"
        );
        std::process::exit(2);
    }

    if let Some(path) = &args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let api_config = ApiConfig::new(&args.api_url).with_geocode_url(&args.geocode_url);
    let position_config = PositionConfig::new(
        &args.position_url,
        Duration::from_secs(args.position_interval.max(1)),
    );
    let api = ApiClient::new(api_config.clone());
    let geocode = GeocodeClient::new(&api_config);
    let handler = EffectHandler::new(api, geocode, position_config);

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, default_center, args.refresh_interval, handler).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    default_center: Coordinate,
    refresh_interval: u64,
    handler: EffectHandler,
) -> io::Result<()> {
    let store = EffectStore::for_app(AppState::new(default_center));
    let mut runtime = Runtime::new(store);

    // Spinner animation while anything is loading.
    runtime.subscriptions().interval(
        "tick",
        Duration::from_millis(LOADING_ANIM_TICK_MS),
        || Action::Tick,
    );

    // Periodic feed refresh; the reducer ignores it on the auth screen.
    runtime.subscriptions().interval(
        "refresh",
        Duration::from_secs(refresh_interval.max(5)),
        || Action::ListingsFetch,
    );

    // Both the render and event closures need the shell mutably.
    let ui = RefCell::new(AppUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                ui.borrow_mut().render(frame, area, state);
            },
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handler.handle(effect, ctx),
        )
        .await
}
