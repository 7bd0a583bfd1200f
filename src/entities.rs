/// All game entity types. Pure data, no logic.

use crate::actors::{Bomb, Plane};
use crate::consts::START_LEVEL;
use crate::grid::WorldGrid;
use crate::score::ScoreTracker;
use crate::strike::StrikeSequencer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Title screen; waiting for any key.
    Start,
    /// One-shot round setup, followed by `Play` on the same tick.
    Preplay,
    Play,
    Pause,
    /// A bomb just took a storey out; explosion countdown running.
    Strike,
    Lose,
    Win,
    Quit,
}

/// Decoded player intent. Raw key codes never reach the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Escape,
    ToggleMute,
    TogglePause,
    /// Drop a bomb, or leave a terminal screen.
    Generic,
    /// The session is being closed.
    Quit,
}

/// Sounds the game can ask the audio collaborator to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Explosion,
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// Logical position plus a "move every N frames" throttle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub frames_between_move: u32,
    pub frames_to_next_move: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation owns.  One value per session, handed by
/// `&mut` to each state handler in `compute`.
#[derive(Clone, Debug)]
pub struct Game {
    pub state: GameState,
    /// State we came from; `None` before the first transition.
    /// Decides whether `Start` resets and where `Pause` resumes.
    pub previous: Option<GameState>,
    pub level: u32,
    pub sound_enabled: bool,
    /// Latched by `Action::Generic`; cleared when the bomb is spent.
    pub drop_requested: bool,
    pub grid: WorldGrid,
    pub plane: Plane,
    pub bomb: Bomb,
    pub score: ScoreTracker,
    pub strike: StrikeSequencer,
    /// Audio cues raised this tick, drained by the frame loop.
    pub cues: Vec<Cue>,
}

impl Game {
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            state: GameState::Start,
            previous: None,
            level: START_LEVEL,
            sound_enabled,
            drop_requested: false,
            grid: WorldGrid::default(),
            plane: Plane::new(),
            bomb: Bomb::new(),
            score: ScoreTracker::new(),
            strike: StrikeSequencer::new(),
            cues: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::Quit
    }
}
