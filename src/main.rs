//! Doodle Jump entry point
//!
//! Parses arguments, sets up the terminal and runs the fixed-interval game loop.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

use doodle_jump::platform::{Command, map_key};
use doodle_jump::renderer::{GameOverSummary, PlayerSprite, render_game, render_game_over};
use doodle_jump::sim::{GameEvent, GamePhase, GameState, start_new_game, tick};
use doodle_jump::{HighScores, Settings};

const DEFAULT_CONFIG_PATH: &str = "doodle_jump.json";
/// Ticks run back-to-back after a stall before the schedule is reset
const MAX_CATCH_UP_TICKS: u32 = 4;

struct CliArgs {
    config: PathBuf,
    seed: Option<u64>,
}

fn parse_args() -> CliArgs {
    let mut cli = CliArgs {
        config: PathBuf::from(DEFAULT_CONFIG_PATH),
        seed: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => cli.config = PathBuf::from(path),
                None => {
                    eprintln!("--config needs a path");
                    std::process::exit(1);
                }
            },
            "--seed" | "-s" => match args.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => cli.seed = Some(seed),
                _ => {
                    eprintln!("--seed needs an unsigned integer");
                    std::process::exit(1);
                }
            },
            "--version" | "-v" => {
                println!("doodle-jump {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Doodle Jump - terminal platformer\n");
                println!("Usage: doodle-jump [options]\n");
                println!("Options:");
                println!("  -c, --config PATH  Settings file (default {})", DEFAULT_CONFIG_PATH);
                println!("  -s, --seed N       Fixed RNG seed");
                println!("  -v, --version      Show version information");
                println!("  -h, --help         Show this help message\n");
                println!("Controls: Left/A and Right/D move, Esc quits");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'doodle-jump --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    cli
}

/// Logs go to the configured file at info level, otherwise to stderr
/// (quiet unless RUST_LOG is set, since stderr shares the terminal).
fn init_logging(log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::new();
    match log_file.map(File::create) {
        Some(Ok(file)) => {
            builder
                .filter_level(log::LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        Some(Err(e)) => eprintln!("Could not open log file: {}", e),
        None => {}
    }
    builder.parse_default_env().init();
}

/// Game instance holding all state
struct Game {
    state: GameState,
    sprite: PlayerSprite,
    /// Shown in the status bar (e.g. missing sprite)
    notice: Option<String>,
    scores: HighScores,
    summary: Option<GameOverSummary>,
    tick_interval: Duration,
}

impl Game {
    fn restart(&mut self) {
        self.summary = None;
        start_new_game(&mut self.state);
        self.drain_events();
    }

    /// Run one simulation tick
    fn update(&mut self) {
        tick(&mut self.state);
        self.drain_events();
    }

    fn drain_events(&mut self) {
        let events: Vec<GameEvent> = self.state.drain_events().collect();
        for event in events {
            match event {
                GameEvent::Landed { platform_id } => log::debug!("Landed on {}", platform_id),
                GameEvent::PlatformBroken { platform_id } => {
                    log::debug!("Platform {} broke", platform_id)
                }
                GameEvent::Scrolled { dy, score } => log::trace!("Scrolled {:.1}, score {}", dy, score),
                GameEvent::PlatformsSpawned { count } => log::debug!("Spawned {} platforms", count),
                GameEvent::GameOver { score } => {
                    let rank = self
                        .scores
                        .add_score(score, self.state.time_ticks, self.state.seed);
                    self.summary = Some(GameOverSummary {
                        score,
                        rank,
                        best: self.scores.top_score(),
                    });
                }
            }
        }
    }

    /// Returns false when the program should exit
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return true;
        }
        let command = map_key(key);

        if self.state.phase == GamePhase::GameOver {
            return match command {
                Some(Command::NewGame) => {
                    self.restart();
                    true
                }
                // Held movement keys keep repeating; don't let them dismiss the result
                Some(Command::Game(_)) => true,
                _ => false,
            };
        }

        match command {
            Some(Command::Game(action)) => {
                self.state.apply_action(action);
                true
            }
            Some(Command::Quit) => false,
            Some(Command::NewGame) | None => true,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        render_game(frame, &self.state, &self.sprite, self.notice.as_deref());
        if let Some(summary) = &self.summary {
            let screen = glam::Vec2::new(
                self.state.config.screen_width,
                self.state.config.screen_height,
            );
            render_game_over(frame, screen, summary);
        }
    }
}

/// Run `setup`, calling `restore` to undo partial work if it fails
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    let result = setup();
    if result.is_err() {
        restore();
    }
    result
}

/// Raw mode plus alternate screen; raw mode is switched back off if the rest fails
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    setup_or_restore(
        || {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            if let Err(e) = restore_terminal() {
                eprintln!("Could not restore terminal: {}", e);
            }
        },
    )
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    io::stdout().execute(LeaveAlternateScreen)?;
    raw
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, game: &mut Game) -> io::Result<()> {
    let mut next_tick = Instant::now() + game.tick_interval;

    loop {
        terminal.draw(|f| game.draw(f))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if !game.handle_key(&key) {
                    return Ok(());
                }
            }
        }

        let mut substeps = 0;
        while Instant::now() >= next_tick && substeps < MAX_CATCH_UP_TICKS {
            game.update();
            next_tick += game.tick_interval;
            substeps += 1;
        }
        if Instant::now() >= next_tick {
            next_tick = Instant::now() + game.tick_interval;
        }
    }
}

fn main() -> io::Result<()> {
    let cli = parse_args();

    let mut settings = match Settings::load_or_default(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    init_logging(settings.log_file.as_deref());
    log::info!("Doodle Jump {} starting", env!("CARGO_PKG_VERSION"));

    let seed = settings.seed.unwrap_or_else(rand::random);
    let state = match GameState::new(settings.world.clone(), seed) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Invalid world config: {}", e);
            std::process::exit(1);
        }
    };

    let (sprite, notice) = PlayerSprite::load_or_placeholder(&settings.sprite_path);
    let mut game = Game {
        state,
        sprite,
        notice,
        scores: HighScores::new(),
        summary: None,
        tick_interval: Duration::from_millis(settings.tick_interval_ms.max(1)),
    };
    game.restart();

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut game);

    // Restore the terminal even if the loop failed
    restore_terminal()?;
    terminal.show_cursor()?;
    result?;

    match &game.summary {
        Some(summary) => println!("Game over! Final score: {}", summary.score),
        None => println!("Score: {}", game.state.score),
    }
    log::info!("Exiting with score {}", game.state.score);
    Ok(())
}
