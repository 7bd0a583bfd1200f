/// The skyline: one building per column, measured in storeys.
///
/// A height of zero means the column has been flattened.  Planes fly
/// through it and bombs fall through it without effect.

use rand::Rng;

use crate::consts::{GRID_COLUMNS, HEIGHT, RISE_STEP, STOREY_HEIGHT, STOREY_WIDTH};

/// Number of building textures in the atlas.
pub const BUILDING_STYLES: u8 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    heights: [u32; GRID_COLUMNS],
    styles: [u8; GRID_COLUMNS],
    remaining: usize,
    /// Pixels the skyline is still hidden below the screen (level 1 only).
    rise: i32,
}

impl Default for WorldGrid {
    fn default() -> Self {
        Self::from_heights([0; GRID_COLUMNS])
    }
}

impl WorldGrid {
    /// Build a grid with explicit heights, plain style and no rise-in.
    pub fn from_heights(heights: [u32; GRID_COLUMNS]) -> Self {
        Self {
            heights,
            styles: [0; GRID_COLUMNS],
            remaining: heights.iter().filter(|&&h| h > 0).count(),
            rise: 0,
        }
    }

    /// Raise a fresh skyline for `level`.  Higher levels build taller.
    pub fn generate(level: u32, rng: &mut impl Rng) -> Self {
        let mut heights = [0; GRID_COLUMNS];
        let mut styles = [0; GRID_COLUMNS];

        for (height, style) in heights.iter_mut().zip(styles.iter_mut()) {
            *style = rng.gen_range(0..BUILDING_STYLES);
            // Lowest possible building is 2 storeys (level 0), 4 from level 1 on.
            let storeys = 7 + 2 * level as i32 + rng.gen_range(0..3) - rng.gen_range(0..6);
            *height = storeys.max(0) as u32;
        }

        let tallest = heights.iter().copied().max().unwrap_or(0);
        let rise = if level == 1 {
            tallest as i32 * STOREY_HEIGHT
        } else {
            0
        };

        Self {
            heights,
            styles,
            remaining: heights.iter().filter(|&&h| h > 0).count(),
            rise,
        }
    }

    /// Column under horizontal pixel `x`, if it lies on the grid.
    /// Division truncates toward zero, so `-19..0` maps to column 0.
    pub fn column_at(x: i32) -> Option<usize> {
        let column = x / STOREY_WIDTH;
        (0..GRID_COLUMNS as i32)
            .contains(&column)
            .then_some(column as usize)
    }

    pub fn height(&self, column: usize) -> u32 {
        self.heights.get(column).copied().unwrap_or(0)
    }

    pub fn heights(&self) -> &[u32; GRID_COLUMNS] {
        &self.heights
    }

    pub fn style(&self, column: usize) -> u8 {
        self.styles.get(column).copied().unwrap_or(0)
    }

    /// Screen `y` of the roof of `column`.
    pub fn roof_y(&self, column: usize) -> i32 {
        HEIGHT - self.height(column) as i32 * STOREY_HEIGHT
    }

    pub fn remaining_columns(&self) -> usize {
        self.remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining == 0
    }

    /// Knock the top storey off `column`.  Returns the new height, or
    /// `None` when the column was already flat (or off the grid).
    pub fn remove_storey(&mut self, column: usize) -> Option<u32> {
        let height = self.heights.get_mut(column).filter(|h| **h > 0)?;
        *height -= 1;
        if *height == 0 {
            self.remaining -= 1;
        }
        Some(*height)
    }

    pub fn rise_offset(&self) -> i32 {
        self.rise
    }

    /// Scroll the rise-in animation one step toward the resting skyline.
    pub fn settle_rise(&mut self) {
        if self.rise > 0 {
            self.rise -= RISE_STEP;
        }
    }
}
