mod audio;
mod input;
mod ui;

use audio::Bell;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{handle_game_input, InputResult};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use rand::Rng;
use slither::build_info;
use slither::core::constants::INPUT_POLL_MS;
use slither::core::{Difficulty, GameEvent, Session, Ticker};
use slither::utils::logging::init_file_logger;
use slither::utils::persistence::data_dir;
use slither::utils::{FileStorage, MemoryStorage, Storage};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Default)]
struct Args {
    difficulty: Option<Difficulty>,
    data_dir: Option<PathBuf>,
    debug: bool,
}

fn print_help() {
    println!("Slither - terminal snake\n");
    println!("Usage: slither [options]\n");
    println!("Options:");
    println!("  --difficulty <name>  easy, normal, hard or expert");
    println!("  --data-dir <path>    Where to keep store.json and slither.log");
    println!("  --debug              Log at debug level");
    println!("  --version            Show version information");
    println!("  --help               Show this help message");
}

/// Parse the command line. Exits the process for `--help`, `--version` and
/// usage errors.
fn parse_args(args: impl IntoIterator<Item = String>) -> Args {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--debug" => parsed.debug = true,
            "--difficulty" => {
                let name = args.next().unwrap_or_default();
                match name.parse::<Difficulty>() {
                    Ok(d) => parsed.difficulty = Some(d),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--data-dir" => match args.next() {
                Some(path) => parsed.data_dir = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--data-dir needs a path");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'slither --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    parsed
}

/// Pick the storage backend. Falls back to an in-memory store so the game
/// still runs without a writable data directory.
fn open_storage(dir: Option<&PathBuf>) -> Box<dyn Storage> {
    match dir.map(|d| FileStorage::open_in(d)) {
        Some(Ok(store)) => {
            info!("using store {}", store.path().display());
            Box::new(store)
        }
        Some(Err(e)) => {
            warn!("store unavailable, scores will not be saved: {}", e);
            Box::new(MemoryStorage::new())
        }
        None => Box::new(MemoryStorage::new()),
    }
}

fn main() -> io::Result<()> {
    let args = parse_args(std::env::args().skip(1));

    let dir = match args.data_dir.clone() {
        Some(dir) => Some(dir),
        None => match data_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                eprintln!("Warning: {}; scores will not be saved.", e);
                None
            }
        },
    };

    // An unusable directory only costs the log and the saved scores
    let dir = dir.filter(|dir| match std::fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "Warning: cannot use {} ({}); scores will not be saved.",
                dir.display(),
                e
            );
            false
        }
    });
    if let Some(dir) = &dir {
        if let Err(e) = init_file_logger(dir, args.debug) {
            eprintln!("Warning: could not open log file: {}", e);
        }
    }
    info!("{}", build_info::version_string());

    let mut session = Session::new(open_storage(dir.as_ref()), rand::thread_rng());
    if let Some(difficulty) = args.difficulty {
        session.set_difficulty(difficulty);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting: best score {}", session.high_score());
    result
}

fn run<R: Rng>(terminal: &mut Term, session: &mut Session<R>) -> io::Result<()> {
    let mut ticker = Ticker::new();
    let idle = Duration::from_millis(INPUT_POLL_MS);

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &session.snapshot()))?;

        let now = Instant::now();
        ticker.sync(session.tick_handle(), now);

        if event::poll(ticker.timeout(now, idle))? {
            if let Event::Key(key) = event::read()? {
                match handle_game_input(key, session) {
                    InputResult::Continue(events) => report(terminal, session, &events),
                    InputResult::Quit => return Ok(()),
                }
            }
        }

        // Input may have paused or re-timed the run
        let now = Instant::now();
        ticker.sync(session.tick_handle(), now);
        if let Some(handle) = ticker.poll(now) {
            let events = session.tick(handle);
            report(terminal, session, &events);
        }
    }
}

/// Forward session events to the audio adapter and the log.
fn report<R: Rng>(terminal: &mut Term, session: &Session<R>, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::GameOver(summary) => info!(
                "summary: score={} best={} level={} win={}",
                summary.score,
                summary.high_score,
                summary.level,
                summary.outcome.is_win()
            ),
            GameEvent::PreferenceChanged { key, value } => info!("{} = {}", key, value),
            _ => {}
        }
    }

    let mut bell = Bell::new(terminal.backend_mut());
    if let Err(e) = bell.play(events, session.preferences().sound_enabled) {
        warn!("bell failed: {}", e);
    }
}
