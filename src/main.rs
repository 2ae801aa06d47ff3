use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use linkwatch::app::{App, View};
use linkwatch::charts::ChartRegistry;
use linkwatch::data::Period;
use linkwatch::source::{HttpSource, TelemetrySource};
use linkwatch::sync::{LongTermSync, ShortTermSync, SyncHandle, SyncUpdate};
use linkwatch::{config, events, ui};

#[derive(Parser, Debug)]
#[command(name = "linkwatch")]
#[command(about = "Terminal dashboard for monitoring network link quality")]
struct Args {
    /// Base URL of the telemetry provider API
    #[arg(short, long)]
    url: Option<String>,

    /// Ping destination to push to the provider at startup (e.g. 1.1.1.1)
    #[arg(short, long)]
    ping_target: Option<String>,

    /// Initial long-term period: day, week, or month
    #[arg(long)]
    period: Option<String>,

    /// Quality score below which the alert fires
    #[arg(long)]
    alert_threshold: Option<u8>,

    /// Suppress the audible alert
    #[arg(short, long)]
    mute: bool,

    /// Path to a TOML settings file (default: ./linkwatch.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append logs to this file (stderr belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = config::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        settings.api_url = url;
    }
    if let Some(target) = args.ping_target {
        settings.ping_target = Some(target);
    }
    if let Some(period) = args.period {
        settings.period = period;
    }
    if let Some(threshold) = args.alert_threshold {
        settings.alert_threshold = threshold;
    }
    if args.mute {
        settings.mute = true;
    }

    let period = Period::from_name(&settings.period)
        .with_context(|| format!("unknown period '{}'", settings.period))?;
    let enabled_charts = settings.enabled_charts()?;

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    info!(api_url = %settings.api_url, "starting linkwatch");

    // The TUI loop stays synchronous; all polling runs on this runtime.
    let runtime = tokio::runtime::Runtime::new()?;

    let source: Arc<dyn TelemetrySource> = Arc::new(HttpSource::new(&settings.api_url)?);
    let description = source.description().to_string();

    // Push the configured ping target before polling starts. Failure is
    // not fatal: the provider keeps its current target.
    if let Some(target) = &settings.ping_target {
        match runtime.block_on(source.set_ping_target(target)) {
            Ok(applied) => info!(target = %applied, "ping target set"),
            Err(e) => warn!("failed to set ping target: {:#}", e),
        }
    }

    let (updates_tx, updates_rx) = mpsc::unbounded_channel();
    let (sync, short_rx, long_rx) = SyncHandle::channel();

    runtime.spawn(
        ShortTermSync::new(
            Arc::clone(&source),
            updates_tx.clone(),
            settings.lookback_secs,
            Duration::from_millis(settings.short_interval_ms),
        )
        .run(short_rx),
    );
    runtime.spawn(
        LongTermSync::new(
            Arc::clone(&source),
            updates_tx,
            period,
            Duration::from_secs(settings.long_interval_secs),
        )
        .run(long_rx),
    );

    let mut app = App::new(
        ChartRegistry::initialize(enabled_charts),
        sync,
        period,
        settings.alert_threshold,
        settings.mute,
        description,
    );

    run_tui(&mut app, updates_rx)
}

/// Set up the terminal, run the main loop, and always restore the terminal.
fn run_tui(app: &mut App, updates: mpsc::UnboundedReceiver<SyncUpdate>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, app, updates);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut updates: mpsc::UnboundedReceiver<SyncUpdate>,
) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Live => ui::live::render(frame, app, chunks[2]),
                View::LongTerm => ui::longterm::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_overlay_hint {
                ui::common::render_overlay_hint(frame, app, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for input with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::FocusGained => events::handle_focus_event(app, true),
                Event::FocusLost => events::handle_focus_event(app, false),
                Event::Mouse(mouse) => {
                    // The tab row sits directly under the header.
                    events::handle_mouse_event(app, mouse, 1);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Apply everything the pollers delivered since the last pass
        while let Ok(update) = updates.try_recv() {
            app.apply_update(update);
        }
    }

    Ok(())
}

/// Route tracing output to a file; the terminal is owned by the TUI.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
