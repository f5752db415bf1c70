use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use healthwatch::data::AlertBoard;
use healthwatch::source::seed;
use healthwatch::ui::{self, Theme};
use healthwatch::{
    events, export, App, BuiltinSource, CaseHistory, DataSource, FileSource, Settings,
    SiteRegistry, View,
};

#[derive(Parser, Debug)]
#[command(name = "healthwatch")]
#[command(about = "Terminal dashboard for community health and water quality monitoring")]
struct Args {
    /// JSON file of site records (built-in demo data when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Export current state to JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref(), args.export.is_some())?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(file) = args.file {
        settings.data_file = Some(file);
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh;
    }

    let source: Box<dyn DataSource> = match settings.data_file {
        Some(ref path) => Box::new(FileSource::new(path)),
        None => Box::new(BuiltinSource::new()),
    };
    info!(source = source.description(), refresh_secs = settings.refresh_secs, "Starting");

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(source, &settings, &export_path);
    }

    run_tui(source, &settings)
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given. Without one, export mode logs to
/// stderr and the TUI stays silent.
fn init_logging(log_file: Option<&Path>, export_mode: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "healthwatch=info".into());

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    let stderr_layer =
        (export_mode && log_file.is_none()).then(|| fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

/// Weekly case reports accompany only the built-in data.
fn case_history(settings: &Settings) -> CaseHistory {
    if settings.data_file.is_some() {
        CaseHistory::default()
    } else {
        seed::default_history()
    }
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: &Settings) -> Result<()> {
    // Detect before raw mode; the query reads from the terminal
    let theme = Theme::auto_detect();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app =
        App::new(source, settings.risk.clone(), case_history(settings)).with_theme(theme);
    app.reload_data();

    let refresh_interval = Duration::from_secs(settings.refresh_secs.max(1));
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 80;
    const MIN_HEIGHT: u16 = 20;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
                frame.render_widget(paragraph, centered.intersection(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Dashboard => ui::dashboard::render(frame, app, chunks[2]),
                View::Trends => ui::trends::render(frame, app, chunks[2]),
                View::Water => ui::water::render(frame, app, chunks[2]),
                View::Villages => ui::villages::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.selection.is_selected() {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table border (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export the current state to a JSON file
fn export_to_file(
    mut source: Box<dyn DataSource>,
    settings: &Settings,
    export_path: &Path,
) -> Result<()> {
    let Some(snapshot) = source.poll() else {
        anyhow::bail!(
            "No data from {}: {}",
            source.description(),
            source.error().unwrap_or("empty source")
        );
    };

    let registry = SiteRegistry::from_records(snapshot, &settings.risk)?;
    let alerts = AlertBoard::new().active(&registry);
    export::write(export_path, &registry, &alerts, &case_history(settings))?;

    println!("Exported state to {}", export_path.display());
    println!("  Sites: {}", registry.len());
    println!("  Active alerts: {}", alerts.len());

    Ok(())
}
