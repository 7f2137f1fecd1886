use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pampas_hero::audio::{self, AudioSink, Silent, TerminalBell};
use pampas_hero::compute::{init_session, step};
use pampas_hero::display::{self, Viewport};
use pampas_hero::input::InputSampler;
use pampas_hero::GameConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Side-scrolling terminal shooter", long_about = None)]
struct Args {
    /// JSON game config; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy spawns (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Where log output goes while the terminal is in raw mode
    #[arg(long, default_value = "pampas_hero.log")]
    log_file: PathBuf,
    /// Disable sound cues
    #[arg(long)]
    mute: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run one session to completion: menu, play, and the victory / defeat
/// screen.  Returns when the player quits or the end screen has been shown.
fn game_loop<W: Write>(
    out: &mut W,
    cfg: &GameConfig,
    rng: &mut StdRng,
    sink: &mut dyn AudioSink,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let frame = cfg.tick_duration();
    let mut session = init_session(cfg);
    let mut sampler = InputSampler::new();

    loop {
        let frame_start = Instant::now();

        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            sampler.handle(&ev);
        }
        let input = sampler.sample();

        let report = step(&mut session, cfg, &input, rng);
        if report.quit {
            log::info!("quit requested at score {}", session.score);
            return Ok(());
        }
        if !report.events.is_empty() {
            log::debug!("tick {}: {:?}", session.frame, report.events);
        }
        audio::dispatch(sink, &report.events);

        display::render(out, &session, cfg, Viewport::current()?)?;

        if session.status.is_terminal() {
            log::info!(
                "{:?} with score {} after {} ticks",
                session.status,
                session.score,
                session.frame
            );
            hold_end_screen(cfg, rx);
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

/// Keep the victory / defeat screen up for the configured time.  Only a quit
/// key cuts it short.
fn hold_end_screen(cfg: &GameConfig, rx: &mpsc::Receiver<Event>) {
    let deadline = Instant::now() + cfg.terminal_display();
    let mut sampler = InputSampler::new();
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        if let Ok(ev) = rx.recv_timeout(left) {
            sampler.handle(&ev);
            if sampler.sample().quit {
                log::info!("end screen dismissed");
                return;
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    // Config errors are reported before the terminal switches to raw mode.
    let cfg = GameConfig::load(args.config.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    log::info!("Pampas Hero starting with seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut sink: Box<dyn AudioSink> = if args.mute || !cfg.sound {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(stdout()))
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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

    let result = game_loop(&mut out, &cfg, &mut rng, sink.as_mut(), &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("game loop failed: {e:#}");
    }
    result
}
