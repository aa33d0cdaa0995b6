mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use space_shooter::config::{default_score_file, GameConfig};
use space_shooter::entities::HeldKeys;
use space_shooter::layout::Viewport;
use space_shooter::screens::{App, Control, FrameInput, InputEvent, KeyPress};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "space_shooter", about = "Single-screen arcade shooter for the terminal")]
struct Args {
    /// File holding the high score [default: ~/.space_shooter_score]
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Enemies on the field at the start of a session
    #[arg(long, default_value_t = 6)]
    enemies: usize,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Do not replace destroyed enemies; clearing the field wins
    #[arg(long)]
    no_respawn: bool,

    /// Ring the terminal bell for shots and explosions
    #[arg(long)]
    bell: bool,

    /// Write logs here (RUST_LOG filters, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            enemy_count: self.enemies,
            respawn: !self.no_respawn,
            fps: self.fps,
            score_file: self.score_file.clone().unwrap_or_else(default_score_file),
        }
    }
}

/// The terminal is in raw mode while playing, so logs only go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Held-key detection ────────────────────────────────────────────────────────

/// A key counts as "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that never report key releases: OS key
/// repeat runs at ≥ 15 Hz, so a live key is refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(135);

fn is_held(seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|key| {
        seen.get(key)
            .map(|&last| now.duration_since(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn held_keys(seen: &HashMap<KeyCode, Instant>, now: Instant) -> HeldKeys {
    HeldKeys {
        left: is_held(seen, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], now),
        right: is_held(seen, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], now),
    }
}

fn translate_key(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
        KeyCode::Char(' ') => InputEvent::Key(KeyPress::Fire),
        KeyCode::Char(c) => InputEvent::Key(KeyPress::Char(c)),
        _ => InputEvent::Key(KeyPress::Other),
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// One iteration per frame: drain input, step the active screen, render,
/// then sleep out the rest of the frame.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    app: &mut App,
    frame: Duration,
    bell: bool,
) -> Result<()> {
    let mut rng = thread_rng();

    // Maps each held key → the instant it was last seen (press or repeat).
    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();

    loop {
        let frame_start = Instant::now();
        let (cols, rows) = terminal::size()?;
        let viewport = Viewport::new(cols, rows);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = FrameInput::default();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_seen.insert(code, frame_start);
                        input.events.push(translate_key(code, modifiers));
                    }
                    KeyEventKind::Repeat => {
                        key_seen.insert(code, frame_start);
                    }
                    KeyEventKind::Release => {
                        key_seen.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let area = viewport.cell_area(column, row);
                    input.events.push(InputEvent::Click { area });
                }
                _ => {}
            }
        }
        input.held = held_keys(&key_seen, frame_start);

        if app.step(&input, &mut rng) == Control::Exit {
            return Ok(());
        }

        let cues = app.take_cues();
        if bell && !cues.is_empty() {
            out.queue(Print("\x07"))?;
        }

        display::render(out, app, viewport)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let config = args.game_config();
    config.validate()?;
    let frame = Duration::from_secs(1) / config.fps;
    tracing::info!(score_file = %config.score_file.display(), "starting");
    let mut app = App::new(config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the frame loop
    // only ever drains a channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &mut app, frame, args.bell);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("terminated: {err:#}");
    }
    result
}
