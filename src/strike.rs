/// Aftermath of a successful bomb strike.

use crate::consts::STRIKE_TICKS;

/// Counts down the explosion and drives the skyline shake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrikeSequencer {
    countdown: u32,
    shake: i32,
}

impl Default for StrikeSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl StrikeSequencer {
    pub fn new() -> Self {
        Self {
            countdown: STRIKE_TICKS,
            shake: 0,
        }
    }

    /// Arm a fresh countdown.  Called on every entry into `Strike`.
    pub fn start(&mut self) {
        *self = Self::new();
    }

    /// One explosion tick.  Returns `true` when the sequence is over, at
    /// which point the sequencer is already rearmed and the shake cleared.
    pub fn advance(&mut self) -> bool {
        self.countdown = self.countdown.saturating_sub(1);
        self.shake = (self.countdown % 3) as i32;
        if self.countdown == 0 {
            self.start();
            return true;
        }
        false
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Vertical skyline offset, in pixels.
    pub fn shake(&self) -> i32 {
        self.shake
    }
}
