//! Blitz: flatten the city before the plane runs out of sky.
//!
//! Core modules:
//! - `entities`: pure data (positions, states, actions, the `Game` aggregate)
//! - `grid`: the 32-column skyline
//! - `actors`: plane and bomb motion
//! - `strike`: explosion countdown and skyline shake
//! - `score`: raw score and the rolling scoreboard
//! - `compute`: the game-state machine
//! - `frame`: draw calls over the sprite atlas
//! - `frame_loop`: fixed-delay tick scheduling
//! - `audio`: explosion cue playback
//! - `input`: key decoding into logical actions
//! - `config`: command-line options

pub mod actors;
pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod frame;
pub mod frame_loop;
pub mod grid;
pub mod input;
pub mod score;
pub mod strike;

/// Game geometry and tuning, in atlas pixels.
pub mod consts {
    use std::time::Duration;

    /// Presentable area
    pub const WIDTH: i32 = 640;
    pub const HEIGHT: i32 = 480;

    /// One storey of one building
    pub const STOREY_WIDTH: i32 = 20;
    pub const STOREY_HEIGHT: i32 = 20;
    pub const GRID_COLUMNS: usize = 32;

    pub const START_LEVEL: u32 = 1;
    pub const SCORE_INCREMENT: u32 = 20;

    /// Plane moves this far every `PLANE_FRAMES_BETWEEN_MOVE` ticks.
    pub const PLANE_INC: i32 = 1;
    pub const PLANE_FRAMES_BETWEEN_MOVE: u32 = 2;
    pub const PLANE_START_X: i32 = 0;
    pub const PLANE_START_Y: i32 = 10;
    /// Where the plane re-enters after leaving on the right.
    pub const PLANE_WRAP_X: i32 = -67;
    pub const PLANE_DESCENT: i32 = 10;
    /// Offset from the plane's left edge to its nose column probe.
    pub const PLANE_NOSE: i32 = 37;
    pub const PLANE_CLEARANCE: i32 = 40;

    pub const BOMB_INC: i32 = 1;
    /// `y` of a bomb that is not falling.
    pub const BOMB_IDLE_Y: i32 = -30;
    /// Bomb spawns this far below the plane's top edge.
    pub const BOMB_DROP_OFFSET: i32 = 30;
    pub const BOMB_CLEARANCE: i32 = 30;

    pub const STRIKE_TICKS: u32 = 10;
    /// Rise-in scroll per skyline composition.
    pub const RISE_STEP: i32 = 5;

    /// Fixed tick budget (≈100 ticks per second)
    pub const TICK: Duration = Duration::from_millis(10);
}
