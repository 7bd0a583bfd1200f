/// The game-state machine.
///
/// `handle_action` applies decoded player input; `tick` runs the active
/// state's handler once, composing the frame and advancing whatever that
/// state lets move.  All randomness comes through the injected RNG so
/// callers control determinism (tests use a seeded one).

use log::{debug, info};
use rand::Rng;

use crate::actors::{BombEvent, Flight};
use crate::consts::*;
use crate::entities::{Action, Cue, Game, GameState};
use crate::frame::{Frame, Sprite, DIGIT_WIDTH};
use crate::grid::WorldGrid;

/// One moon frame in fifty is the flicker frame.
const MOON_FLICKER_ODDS: u32 = 50;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_game(sound_enabled: bool) -> Game {
    Game::new(sound_enabled)
}

// ── Input-driven transitions ─────────────────────────────────────────────────

pub fn handle_action(game: &mut Game, action: Action) {
    match action {
        Action::Quit => set_state(game, GameState::Quit),
        Action::Escape => {
            let next = if game.state == GameState::Start {
                GameState::Quit
            } else {
                GameState::Start
            };
            set_state(game, next);
        }
        Action::ToggleMute => {
            game.sound_enabled = !game.sound_enabled;
            info!("sound {}", if game.sound_enabled { "on" } else { "off" });
        }
        Action::TogglePause => toggle_pause(game),
        Action::Generic => match game.state {
            GameState::Lose => leave(game, GameState::Start),
            GameState::Start => leave(game, GameState::Preplay),
            GameState::Win => {
                game.level += 1;
                leave(game, GameState::Preplay);
            }
            _ => game.drop_requested = true,
        },
    }
}

/// Pause only from live play; resume exactly where we left off.
fn toggle_pause(game: &mut Game) {
    match game.state {
        GameState::Pause => {
            let resume = game.previous.unwrap_or(GameState::Play);
            set_state(game, resume);
        }
        GameState::Play | GameState::Strike => leave(game, GameState::Pause),
        _ => {}
    }
}

/// Transition that remembers where it came from.
fn leave(game: &mut Game, next: GameState) {
    game.previous = Some(game.state);
    set_state(game, next);
}

fn set_state(game: &mut Game, next: GameState) {
    if game.state != next {
        debug!("state {:?} -> {:?}", game.state, next);
    }
    game.state = next;
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Run the active state once and compose its frame into `frame`.
pub fn tick(game: &mut Game, frame: &mut Frame, rng: &mut impl Rng) {
    frame.clear();
    frame.blit(Sprite::Background, 0, 0);

    match game.state {
        GameState::Start => start(game, frame),
        GameState::Preplay => {
            preplay(game, rng);
            play(game, frame, rng);
        }
        GameState::Play => play(game, frame, rng),
        GameState::Pause => pause(game, frame, rng),
        GameState::Strike => strike(game, frame, rng),
        GameState::Lose => lose(game, frame, rng),
        GameState::Win => win(game, frame, rng),
        GameState::Quit => {}
    }
}

/// Audio cues raised since the last drain.
pub fn drain_cues(game: &mut Game) -> Vec<Cue> {
    std::mem::take(&mut game.cues)
}

// ── State handlers ───────────────────────────────────────────────────────────

fn start(game: &mut Game, frame: &mut Frame) {
    if game.previous != Some(GameState::Start) {
        reset_game(game);
    }
    frame.blit(Sprite::Title, 143, 0);
    frame.blit(Sprite::Instructions, 202, 197);
    frame.blit(Sprite::Credits, 130, 420);
}

/// Back to level one with a clean scoreboard.
fn reset_game(game: &mut Game) {
    game.drop_requested = false;
    game.level = START_LEVEL;
    game.previous = Some(GameState::Start);
    game.score.reset();
    game.plane.reset();
    game.bomb.reset();
    debug!("game reset");
}

fn preplay(game: &mut Game, rng: &mut impl Rng) {
    game.plane.reset();
    game.bomb.reset();
    game.grid = WorldGrid::generate(game.level, rng);
    game.drop_requested = false;
    game.strike.start();
    game.previous = Some(GameState::Preplay);
    set_state(game, GameState::Play);
    info!(
        "level {}: {} buildings standing",
        game.level,
        game.grid.remaining_columns()
    );
}

fn play(game: &mut Game, frame: &mut Frame, rng: &mut impl Rng) {
    compose_scene(game, frame, rng);
    compose_plane(game, frame);
    compose_bomb(game, frame);

    advance_plane(game);
    if game.state == GameState::Play {
        advance_bomb(game);
    }
}

fn pause(game: &mut Game, frame: &mut Frame, rng: &mut impl Rng) {
    compose_scene(game, frame, rng);
    compose_plane(game, frame);
    if game.previous == Some(GameState::Strike) {
        compose_explosion(game, frame);
    } else {
        compose_bomb(game, frame);
    }
    frame.blit(Sprite::PauseGlyph, 295, 220);
}

/// The plane keeps flying while the explosion plays out.
fn strike(game: &mut Game, frame: &mut Frame, rng: &mut impl Rng) {
    compose_scene(game, frame, rng);
    compose_plane(game, frame);
    compose_explosion(game, frame);

    advance_plane(game);
    if game.state == GameState::Strike && game.strike.advance() {
        game.bomb.reset();
        game.drop_requested = false;
        set_state(game, GameState::Play);
    }
}

fn lose(game: &mut Game, frame: &mut Frame, rng: &mut impl Rng) {
    compose_scene(game, frame, rng);
    frame.blit(
        Sprite::Explosion,
        game.plane.pos.x - 25,
        game.plane.pos.y - 15,
    );
    frame.blit(Sprite::LoseBanner, 41, 197);
}

fn win(game: &mut Game, frame: &mut Frame, rng: &mut impl Rng) {
    compose_scene(game, frame, rng);
    frame.blit(Sprite::WinBanner, 46, 196);
}

// ── Actor advancement ────────────────────────────────────────────────────────

fn advance_plane(game: &mut Game) {
    if game.plane.advance(&game.grid) == Flight::Crashed {
        info!(
            "crashed at ({}, {}) on level {}, score {}",
            game.plane.pos.x,
            game.plane.pos.y,
            game.level,
            game.score.raw()
        );
        set_state(game, GameState::Lose);
    }
}

fn advance_bomb(game: &mut Game) {
    let event = game
        .bomb
        .advance(game.drop_requested, &game.plane, &mut game.grid);

    match event {
        BombEvent::Struck { column, height } => {
            debug!("strike on column {column}, {height} storeys left");
            game.score.award(SCORE_INCREMENT);
            if game.sound_enabled {
                game.cues.push(Cue::Explosion);
            }
            if game.grid.is_cleared() {
                info!("level {} cleared, score {}", game.level, game.score.raw());
                set_state(game, GameState::Win);
            } else {
                game.strike.start();
                set_state(game, GameState::Strike);
            }
        }
        BombEvent::Spent => game.drop_requested = false,
        BombEvent::Idle | BombEvent::Released | BombEvent::Falling => {}
    }
}

// ── Composition ──────────────────────────────────────────────────────────────

/// Moon, scoreboard and skyline: the backdrop every in-round state shares.
fn compose_scene(game: &mut Game, frame: &mut Frame, rng: &mut impl Rng) {
    compose_moon(game, frame, rng);
    compose_score(game, frame);
    compose_skyline(game, frame);
}

fn compose_moon(game: &Game, frame: &mut Frame, rng: &mut impl Rng) {
    let roll = rng.gen_ratio(1, MOON_FLICKER_ODDS);
    let flicker = roll || game.state == GameState::Pause;
    frame.blit(Sprite::Moon { flicker }, 555, 10);
}

/// Label, then the displayed total right-aligned after it.
fn compose_score(game: &mut Game, frame: &mut Frame) {
    game.score.tick_display();
    frame.blit(Sprite::ScoreLabel, 10, 10);
    let mut x = 70;
    for digit in game.score.displayed_digits() {
        x += DIGIT_WIDTH;
        frame.blit(Sprite::Digit(digit), x, 10);
    }
}

fn compose_skyline(game: &mut Game, frame: &mut Frame) {
    let offset = game.grid.rise_offset() - game.strike.shake();
    for (column, &height) in game.grid.heights().iter().enumerate() {
        let style = game.grid.style(column);
        let x = column as i32 * STOREY_WIDTH;
        for storey in 0..height as i32 {
            let y = HEIGHT - STOREY_HEIGHT - storey * STOREY_HEIGHT + offset;
            frame.blit(Sprite::Storey { style }, x, y);
        }
    }
    game.grid.settle_rise();
}

fn compose_plane(game: &Game, frame: &mut Frame) {
    let paused = game.state == GameState::Pause;
    frame.blit(Sprite::Plane { paused }, game.plane.pos.x, game.plane.pos.y);
}

fn compose_bomb(game: &Game, frame: &mut Frame) {
    if game.bomb.pos.y > 0 {
        frame.blit(Sprite::Bomb, game.bomb.pos.x, game.bomb.pos.y);
    }
}

fn compose_explosion(game: &Game, frame: &mut Frame) {
    frame.blit(
        Sprite::Explosion,
        game.bomb.pos.x - 50,
        game.bomb.pos.y - 30,
    );
}
