/// Fixed-delay tick scheduling.
///
/// Every tick runs input → update/compose → present → audio cues → sleep.
/// A tick that overruns its budget is not made up for: the next one just
/// starts late, so the simulation speed is tick-count based.

use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::audio::AudioOut;
use crate::compute::{drain_cues, handle_action, tick};
use crate::entities::{Action, Game};
use crate::frame::Frame;

/// Tracks when the next tick may begin.
#[derive(Clone, Debug)]
pub struct FrameClock {
    budget: Duration,
    next: Option<Instant>,
}

impl FrameClock {
    pub fn new(budget: Duration) -> Self {
        Self { budget, next: None }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left before the next tick is due, measured at `now`.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next
            .and_then(|next| next.checked_duration_since(now))
            .filter(|left| !left.is_zero())
    }

    /// Mark the end of a tick at `now` and schedule the next.
    pub fn mark(&mut self, now: Instant) {
        self.next = Some(now + self.budget);
    }

    /// Sleep out whatever is left of the budget, then start the next one.
    pub fn wait(&mut self) {
        if let Some(left) = self.remaining(Instant::now()) {
            thread::sleep(left);
        }
        self.mark(Instant::now());
    }
}

/// Everything one tick of the loop touches except the presenter.
pub struct Session<'a, R: Rng, A: AudioOut + ?Sized> {
    pub game: &'a mut Game,
    pub frame: &'a mut Frame,
    pub rng: &'a mut R,
    pub audio: &'a mut A,
}

impl<R: Rng, A: AudioOut + ?Sized> Session<'_, R, A> {
    /// Feed this tick's actions in and run the state machine once.
    /// Returns `false` once the game has quit; the frame is then stale.
    pub fn update(&mut self, actions: impl IntoIterator<Item = Action>) -> bool {
        for action in actions {
            handle_action(self.game, action);
        }
        if !self.game.sound_enabled {
            self.audio.silence();
        }
        if self.game.is_over() {
            return false;
        }
        tick(self.game, self.frame, self.rng);
        true
    }

    /// Hand this tick's cues to the audio collaborator.  Call after present.
    pub fn dispatch_cues(&mut self) {
        for cue in drain_cues(self.game) {
            self.audio.play(cue);
        }
    }
}
