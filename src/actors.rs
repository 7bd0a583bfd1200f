/// Plane and bomb motion.
///
/// Both actors step in whole pixels.  Collision is resolved against the
/// grid by column, never by pixel overlap.

use crate::consts::*;
use crate::entities::Position;
use crate::grid::WorldGrid;

/// Outcome of one plane step.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    Clear,
    Crashed,
}

/// Outcome of one bomb step.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombEvent {
    /// Nothing in the air, nothing requested.
    Idle,
    /// Left the plane this tick.
    Released,
    Falling,
    /// Took a storey off `column`, leaving `height` storeys.
    Struck { column: usize, height: u32 },
    /// Fell off the bottom of the screen without hitting anything.
    Spent,
}

// ── Plane ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    pub pos: Position,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new()
    }
}

impl Plane {
    pub fn new() -> Self {
        Self {
            pos: Position {
                x: PLANE_START_X,
                y: PLANE_START_Y,
                frames_between_move: PLANE_FRAMES_BETWEEN_MOVE,
                frames_to_next_move: PLANE_FRAMES_BETWEEN_MOVE - 1,
            },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Column under the plane's nose, if over the grid.
    pub fn nose_column(&self) -> Option<usize> {
        WorldGrid::column_at(self.pos.x + PLANE_NOSE)
    }

    /// Column a bomb released now would fall down.
    pub fn drop_column(&self) -> Option<usize> {
        WorldGrid::column_at(self.pos.x)
    }

    /// Move one throttled step, wrapping past the right edge with a
    /// descent, then check the nose against the skyline.
    pub fn advance(&mut self, grid: &WorldGrid) -> Flight {
        let pos = &mut self.pos;
        if pos.frames_to_next_move == 0 {
            pos.x += PLANE_INC;
            if pos.x > WIDTH {
                pos.x = PLANE_WRAP_X;
                pos.y += PLANE_DESCENT;
            }
            pos.frames_to_next_move = pos.frames_between_move.saturating_sub(1);
        } else {
            pos.frames_to_next_move -= 1;
        }

        if self.has_crashed(grid) {
            Flight::Crashed
        } else {
            Flight::Clear
        }
    }

    /// Off-grid columns never count as a crash.
    pub fn has_crashed(&self, grid: &WorldGrid) -> bool {
        self.nose_column()
            .is_some_and(|column| self.pos.y > grid.roof_y(column) - PLANE_CLEARANCE)
    }
}

// ── Bomb ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bomb {
    pub pos: Position,
}

impl Default for Bomb {
    fn default() -> Self {
        Self::new()
    }
}

impl Bomb {
    pub fn new() -> Self {
        Self {
            pos: Position {
                x: 0,
                y: BOMB_IDLE_Y,
                ..Position::default()
            },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_falling(&self) -> bool {
        self.pos.y != BOMB_IDLE_Y
    }

    /// Release, fall and strike.
    ///
    /// A bomb over a flattened column keeps falling; it only stops by
    /// hitting a storey or leaving the bottom of the screen.
    pub fn advance(&mut self, drop_requested: bool, plane: &Plane, grid: &mut WorldGrid) -> BombEvent {
        let mut event = BombEvent::Idle;

        if drop_requested && !self.is_falling() {
            if let Some(column) = plane.drop_column() {
                self.pos.x = column as i32 * STOREY_WIDTH;
                self.pos.y = plane.pos.y + BOMB_DROP_OFFSET;
                event = BombEvent::Released;
            }
        } else if self.is_falling() {
            self.pos.y += BOMB_INC;
            event = self.check_strike(grid);
        }

        if self.pos.y > HEIGHT {
            self.reset();
            event = BombEvent::Spent;
        }
        event
    }

    fn check_strike(&self, grid: &mut WorldGrid) -> BombEvent {
        let Some(column) = WorldGrid::column_at(self.pos.x) else {
            return BombEvent::Falling;
        };
        if self.pos.y <= grid.roof_y(column) - BOMB_CLEARANCE {
            return BombEvent::Falling;
        }
        match grid.remove_storey(column) {
            Some(height) => BombEvent::Struck { column, height },
            None => BombEvent::Falling,
        }
    }
}
