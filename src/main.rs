mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{cursor, event::{self, Event}, terminal, ExecutableCommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use blitz::audio::{self, AudioOut};
use blitz::compute::init_game;
use blitz::config::Config;
use blitz::consts::TICK;
use blitz::frame::Frame;
use blitz::frame_loop::{FrameClock, Session};
use blitz::input;

use display::Screen;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file.  Falls back to
/// stderr if the file cannot be created.
fn init_logging(config: &Config) {
    let path = config.log_path();
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder.init();
        }
        Err(err) => {
            builder.init();
            warn!("cannot create log file {}: {err}", path.display());
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the state machine reaches `Quit`.
fn game_loop<W: Write>(
    out: &mut W,
    screen: &mut Screen,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    audio: &mut dyn AudioOut,
) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = init_game(!config.mute);
    let mut frame = Frame::new();
    let mut clock = FrameClock::new(TICK);

    let mut session = Session {
        game: &mut game,
        frame: &mut frame,
        rng: &mut rng,
        audio,
    };

    loop {
        // Drain all pending input events (non-blocking)
        let actions: Vec<_> = rx.try_iter().filter_map(|ev| input::decode(&ev)).collect();

        if !session.update(actions) {
            break;
        }
        screen
            .present(out, session.frame, session.game)
            .context("presenting frame")?;
        session.dispatch_cues();
        clock.wait();
    }

    info!("quit at level {}, score {}", session.game.level, session.game.score.raw());
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config);
    info!("blitz starting: {config:?}");

    let (cols, rows) = terminal::size().context("querying terminal size")?;
    let Some(mut screen) = Screen::fit(cols, rows) else {
        bail!(
            "terminal is {cols}x{rows}; blitz needs at least {}x{}",
            display::COLS,
            display::ROWS
        );
    };

    let mut audio = audio::open(config.explosion.as_deref());

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    let setup = out
        .execute(terminal::EnterAlternateScreen)
        .and_then(|out| out.execute(cursor::Hide))
        .map(|_| ())
        .context("entering alternate screen");

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

    let result = setup.and_then(|()| game_loop(&mut out, &mut screen, &rx, &config, audio.as_mut()));

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    result
}
