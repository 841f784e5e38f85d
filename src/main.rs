use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use qtimer::{
    config::{ConfigStore, FileConfigStore},
    runtime::{AppEvent, Clock, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    ui, App,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    panic,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "QTIMER_LOG";
const DEFAULT_LOG_FILTER: &str = "qtimer=info";

/// time each question of a session and review the durations at the end
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Set a number of questions, step through them while the time spent on each one accumulates, then review a summary. Space moves to the next question."
)]
pub struct Cli {
    /// prefill the number of questions on the start screen
    #[clap(short = 'n', long)]
    questions: Option<usize>,

    /// redraw interval in milliseconds (does not affect timing accuracy)
    #[clap(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// write logs to this file (filter with QTIMER_LOG, e.g. QTIMER_LOG=qtimer=debug)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// read preferences from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// store the effective --questions/--tick-ms as the new defaults
    #[clap(long)]
    save_config: bool,
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    Ok(())
}

/// Run `restore` before the previous panic hook prints its message.
fn restore_on_panic<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, crossterm::cursor::Show)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = store.load().merged(cli.questions, cli.tick_ms);
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "preferences saved");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    restore_on_panic(|| {
        let _ = restore_terminal();
    });
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_draft(config.questions);
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::from_millis(config.tick_rate_ms),
    );
    info!(tick_rate_ms = config.tick_rate_ms, "qtimer started");
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    restore_terminal()?;
    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T, C>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit {
        let step = runner.step();

        // the wait belongs to the question that was active before this event
        app.advance(step.elapsed);

        match step.event {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Resize | AppEvent::Tick => {}
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    info!("qtimer exiting");
    Ok(())
}
