/// Raw score and the rolling scoreboard.

use crate::consts::SCORE_INCREMENT;

/// Displayed total before anything has been counted.
const DISPLAY_UNSET: i64 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreTracker {
    raw: u32,
    /// Lags `raw`; rolls up one point per tick.
    displayed: i64,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self {
            raw: 0,
            displayed: DISPLAY_UNSET,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn award(&mut self, points: u32) {
        self.raw = self.raw.saturating_add(points);
    }

    /// Roll the displayed total one tick toward the raw score.  Gaps wider
    /// than one strike's worth are closed in one jump.
    pub fn tick_display(&mut self) {
        let raw = i64::from(self.raw);
        if raw - self.displayed > i64::from(SCORE_INCREMENT) {
            self.displayed = raw;
        } else if self.displayed < raw {
            self.displayed += 1;
        }
    }

    pub fn raw(&self) -> u32 {
        self.raw
    }

    pub fn displayed(&self) -> i64 {
        self.displayed
    }

    /// Decimal digits of the displayed total, most significant first.
    /// Empty while the total is zero or unset.
    pub fn displayed_digits(&self) -> Vec<u8> {
        let mut digits = Vec::new();
        let mut rest = self.displayed;
        while rest > 0 {
            digits.push((rest % 10) as u8);
            rest /= 10;
        }
        digits.reverse();
        digits
    }
}
