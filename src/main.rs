// ABOUTME: Main entry point for the wc-status TUI application

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, Terminal};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{error, info};

use wc_status::app::{App, EventHandler};
use wc_status::components::LayoutComponent;
use wc_status::config::AppConfig;
use wc_status::panel::PanelEvent;
use wc_status::source::{GitStatusSource, MockStatusSource, StatusSource};

#[derive(Debug, Parser)]
#[command(name = "wc-status", version, about = "Interactive working-copy status panel")]
struct Args {
    /// Repository or any directory inside it
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Use a seeded in-memory working copy instead of a repository
    #[arg(long)]
    mock: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log: Option<PathBuf>,

    /// Scroll padding override
    #[arg(long)]
    padding: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(padding) = args.padding {
        config.scroll_padding = padding;
    }

    setup_logging(&config, args.log.as_deref())?;
    setup_panic_handler();

    let source: Box<dyn StatusSource + Send> = if args.mock {
        info!("Starting with mock working copy");
        Box::new(MockStatusSource::demo())
    } else {
        let source = GitStatusSource::open(&args.repo)
            .with_context(|| format!("Cannot open working copy at {}", args.repo.display()))?;
        info!("Opened working copy at {}", source.workdir().display());
        Box::new(source)
    };

    let mut app = App::new(source, &config);
    let mut layout = LayoutComponent::new();

    run_tui(&mut app, &mut layout).await?;

    Ok(())
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.state.dispatch(PanelEvent::Resize {
        height: LayoutComponent::panel_height(size.height),
    });
    app.init();

    let result = event_loop(&mut terminal, app, layout).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    layout: &mut LayoutComponent,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
                Event::Resize(_, rows) => {
                    app.state.dispatch(PanelEvent::Resize {
                        height: LayoutComponent::panel_height(rows),
                    });
                }
                _ => {}
            }
        }

        // Effects queued by key handling go out immediately; completions are drained here too
        app.tick();
        if app.needs_ui_refresh() {
            terminal.draw(|frame| {
                layout.render(frame, &app.state);
            })?;
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}

fn setup_logging(config: &AppConfig, log_path: Option<&std::path::Path>) -> Result<()> {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_file = match log_path {
        Some(path) => path.to_path_buf(),
        None => {
            let log_dir = config.log_dir();
            std::fs::create_dir_all(&log_dir)
                .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
            log_dir.join(format!(
                "wc-status-{}.log",
                chrono::Local::now().format("%Y%m%d-%H%M%S")
            ))
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    Ok(())
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before reporting
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
