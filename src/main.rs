mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use survival_shooter::compute::{finish_round, init_state, restart, tick};
use survival_shooter::config::{secs_to_ms, GameConfig};
use survival_shooter::entities::{InputState, TickContext};
use survival_shooter::logging::log_filter;
use survival_shooter::scores::{JsonFileStore, ScoreStore};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(
    name = "survival_shooter",
    about = "Survive the clock while your ship fires at whatever comes closest"
)]
struct Cli {
    /// Round length in seconds.
    #[arg(long, default_value_t = 300)]
    duration_secs: u64,

    /// Ticks between regular enemy spawns.
    #[arg(long, default_value_t = 120)]
    spawn_rate: u32,

    /// Minimum milliseconds between automatic shots.
    #[arg(long, default_value_t = 750)]
    fire_rate_ms: u64,

    /// Seconds of boss-free play before a boss appears.
    #[arg(long, default_value_t = 40)]
    boss_interval_secs: u64,

    /// High-score file (JSON). Defaults to ~/.survival_shooter_scores.json.
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Log file; the terminal itself is taken by the game.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed the RNG for a reproducible round.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            enemy_spawn_rate: self.spawn_rate.max(1),
            fire_rate_ms: self.fire_rate_ms,
            game_duration_ms: secs_to_ms(self.duration_secs),
            boss_interval_ms: secs_to_ms(self.boss_interval_secs) as f64,
        }
    }

    fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".survival_shooter.log")
        })
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn now_ms(clock: &Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_any(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, *k, frame))
}

fn sample_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    use KeyCode::{Char, Down, Left, Right, Up};
    InputState {
        up: held_any(key_frame, &[Up, Char('w'), Char('W')], frame),
        down: held_any(key_frame, &[Down, Char('s'), Char('S')], frame),
        left: held_any(key_frame, &[Left, Char('a'), Char('A')], frame),
        right: held_any(key_frame, &[Right, Char('d'), Char('D')], frame),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs rounds back to back until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and each frame samples which directions
/// are still "fresh". Terminals with keyboard enhancement also send Release
/// events, which drop the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &JsonFileStore,
    config: GameConfig,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let clock = Instant::now();
    let (cols, rows) = terminal::size()?;
    let (width, height) = display::world_size(cols, rows);
    let mut state = init_state(config, width, height, now_ms(&clock), store.load());
    tracing::info!(
        width,
        height,
        high_scores = state.high_scores.len(),
        "round started"
    );

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if state.is_over() => {
                            state = restart(&state, now_ms(&clock));
                            key_frame.clear();
                            tracing::info!("round restarted");
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let (cols, rows) = terminal::size()?;
        let (width, height) = display::world_size(cols, rows);
        let ctx = TickContext {
            input: sample_input(&key_frame, frame),
            now_ms: now_ms(&clock),
            width,
            height,
        };
        state = tick(&state, &ctx, rng);

        if state.is_over() {
            finish_round(&mut state, store);
        }

        display::render(out, &state, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_path())?;

    let store = JsonFileStore::new(
        cli.scores_file
            .clone()
            .unwrap_or_else(JsonFileStore::default_path),
    );
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(scores = %store.path().display(), seed = ?cli.seed, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("could not enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &store, cli.game_config(), &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("game loop failed: {e:#}");
    }
    result
}
