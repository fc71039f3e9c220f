mod display;

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::Color,
    terminal, ExecutableCommand,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use space_inflators::hooks::{InputHook, SoundHook, StatusHook};
use space_inflators::{
    Hooks, Key, RandomSource, RngSource, SoundEvent, TickStatus, Tuning, World,
};

/// Terminal front end for the Space Inflators simulation.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// TOML file overriding gameplay tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the random source for a repeatable game.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per simulation tick.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Where log output goes; the terminal belongs to the game.
    #[arg(long, default_value = "space_inflators.log")]
    log_file: PathBuf,
}

// ── Hooks ─────────────────────────────────────────────────────────────────────

/// Holds the most recent keypress until the world reads it.
struct KeyboardInput {
    pending: Rc<Cell<Option<Key>>>,
}

impl InputHook for KeyboardInput {
    fn last_key(&mut self) -> Option<Key> {
        self.pending.take()
    }
}

/// No audio device: sound cues go to the log.
struct LoggedSound;

impl SoundHook for LoggedSound {
    fn play_sound(&mut self, event: SoundEvent) {
        debug!(?event, "sound");
    }
}

struct SharedStatus {
    text: Rc<RefCell<String>>,
}

impl StatusHook for SharedStatus {
    fn set_status_text(&mut self, text: &str) {
        let mut shown = self.text.borrow_mut();
        shown.clear();
        shown.push_str(text);
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Command {
    Play(Key),
    Quit,
}

fn translate(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    let key = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Command::Quit)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Down,
        KeyCode::Char(' ') => Key::Fire,
        KeyCode::Tab => Key::Torpedo,
        KeyCode::Char(other) => Key::Other(other as u32),
        _ => return None,
    };
    Some(Command::Play(key))
}

/// Blocks until any key is pressed. Returns `false` if it was a quit key.
fn wait_for_key(rx: &mpsc::Receiver<Event>) -> anyhow::Result<bool> {
    loop {
        let event = rx.recv().context("keyboard reader stopped")?;
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            return Ok(!matches!(translate(code, modifiers), Some(Command::Quit)));
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: Tuning,
    rng: Box<dyn RandomSource>,
    frame: Duration,
) -> anyhow::Result<()> {
    display::draw_prompt(
        out,
        &["SPACE INFLATORS", "", "Press any key to start", "Q to quit"],
        Color::Cyan,
    )?;
    if !wait_for_key(rx)? {
        return Ok(());
    }

    let pending = Rc::new(Cell::new(None));
    let status = Rc::new(RefCell::new(String::new()));
    let hooks = Hooks::new(
        LoggedSound,
        KeyboardInput {
            pending: Rc::clone(&pending),
        },
        SharedStatus {
            text: Rc::clone(&status),
        },
    );
    let mut world = World::new(tuning, hooks, rng);
    info!(lives = world.lives(), "game started");

    loop {
        let frame_start = Instant::now();

        // The world reads at most one key per tick; the newest wins.
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event
            else {
                continue;
            };
            match translate(code, modifiers) {
                Some(Command::Quit) => {
                    info!(score = world.score(), "quit by player");
                    return Ok(());
                }
                Some(Command::Play(key)) => pending.set(Some(key)),
                None => {}
            }
        }

        let outcome = world.advance_tick();
        display::render(out, &world, &status.borrow())?;

        if outcome == TickStatus::PlayerDied {
            pending.set(None);
            if world.is_game_over() {
                let score = format!("Final score: {:07}", world.score());
                display::draw_prompt(out, &["GAME OVER", "", score.as_str()], Color::Red)?;
                wait_for_key(rx)?;
                return Ok(());
            }
            let ships = format!("Ships left: {}", world.lives());
            display::draw_prompt(
                out,
                &["You lost a life!", ships.as_str(), "", "Press any key"],
                Color::Yellow,
            )?;
            if !wait_for_key(rx)? {
                return Ok(());
            }
            world.restart_round();
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => {
            info!(seed, "seeded random source");
            Box::new(RngSource::seeded(seed))
        }
        None => Box::new(RngSource::from_entropy()),
    };

    let (width, height) = terminal::size().context("failed to query terminal size")?;
    if width < display::REQUIRED_COLUMNS || height < display::REQUIRED_ROWS {
        warn!(
            width,
            height,
            needed_width = display::REQUIRED_COLUMNS,
            needed_height = display::REQUIRED_ROWS,
            "terminal smaller than the play field"
        );
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(
        &mut out,
        &rx,
        tuning,
        rng,
        Duration::from_millis(args.tick_ms.max(1)),
    );

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "game aborted");
    }
    result
}
