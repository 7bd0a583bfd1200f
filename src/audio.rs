/// Explosion cue playback.
///
/// A cue is an immutable buffer of interleaved samples.  The game thread
/// and the device thread share one `CueCursor` over it:
///
/// - the game thread (writer) pauses the cursor, rewinds it to the start
///   of the buffer, then unpauses it;
/// - the device thread (reader) only advances the position while the
///   cursor is unpaused, and pauses it itself once the buffer runs out.
///
/// Pause/unpause bracketing is the only mutual exclusion.  There is no
/// lock: position and paused flag live in one atomic word, and every
/// reader store is a compare-exchange against the word it read.  A rewind
/// that lands between the reader's load and store changes that word, so
/// the reader's step (or its end-of-buffer pause) fails and it starts over
/// from the rewound state.  A replayed cue always starts from the first
/// sample and is never silenced by a stale end-of-buffer pause.  The game
/// never waits on audio.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::Cue;

const SYNTH_SAMPLE_RATE: u32 = 22_050;
const SYNTH_SECONDS: f32 = 0.6;
/// Fixed seed so every session hears the same explosion.
const SYNTH_SEED: u64 = 0xB112;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum AudioError {
    Io(std::io::Error),
    Decode(String),
    Device(String),
    /// Built without the `audio` feature.
    Unsupported,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Io(err) => write!(f, "cannot open cue: {err}"),
            AudioError::Decode(msg) => write!(f, "cannot decode cue: {msg}"),
            AudioError::Device(msg) => write!(f, "cannot open audio device: {msg}"),
            AudioError::Unsupported => f.write_str("built without audio support"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError::Io(err)
    }
}

// ── Cue buffer ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct CueBuffer {
    samples: Arc<[i16]>,
    channels: u16,
    sample_rate: u32,
}

impl CueBuffer {
    pub fn new(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            channels: channels.max(1),
            sample_rate,
        }
    }

    /// Decaying white-noise burst.
    pub fn synthesized() -> Self {
        let mut rng = StdRng::seed_from_u64(SYNTH_SEED);
        let len = (SYNTH_SAMPLE_RATE as f32 * SYNTH_SECONDS) as usize;
        let samples = (0..len)
            .map(|i| {
                let t = i as f32 / len as f32;
                let envelope = (1.0 - t).powi(3);
                let noise: f32 = rng.gen_range(-1.0..1.0);
                (noise * envelope * f32::from(i16::MAX) * 0.6) as i16
            })
            .collect();
        Self::new(samples, 1, SYNTH_SAMPLE_RATE)
    }

    /// Decode a WAV file.
    #[cfg(feature = "audio")]
    pub fn from_wav(path: &Path) -> Result<Self, AudioError> {
        use rodio::Source;

        let file = std::fs::File::open(path)?;
        let decoder = rodio::Decoder::new(std::io::BufReader::new(file))
            .map_err(|err| AudioError::Decode(err.to_string()))?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<i16> = decoder.collect();
        if samples.is_empty() {
            return Err(AudioError::Decode(format!("{} holds no samples", path.display())));
        }
        Ok(Self::new(samples, channels, sample_rate))
    }

    #[cfg(not(feature = "audio"))]
    pub fn from_wav(path: &Path) -> Result<Self, AudioError> {
        std::fs::metadata(path)?;
        Err(AudioError::Unsupported)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }
}

// ── Shared cursor ─────────────────────────────────────────────────────────────

/// Low bit of the cursor word; the position sits above it.
const PAUSED: usize = 1;

fn unpack(word: usize) -> (usize, bool) {
    (word >> 1, word & PAUSED != 0)
}

/// Playback position shared between the game and device threads.
#[derive(Clone, Debug)]
pub struct CueCursor {
    word: Arc<AtomicUsize>,
}

impl Default for CueCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl CueCursor {
    /// Starts paused.
    pub fn new() -> Self {
        Self {
            word: Arc::new(AtomicUsize::new(PAUSED)),
        }
    }

    /// Writer side: restart the cue from its first sample.
    pub fn rewind(&self) {
        self.word.fetch_or(PAUSED, Ordering::AcqRel);
        self.word.store(PAUSED, Ordering::Release);
        self.word.store(0, Ordering::Release);
    }

    /// Writer side: stop playback without touching the position.
    pub fn pause(&self) {
        self.word.fetch_or(PAUSED, Ordering::AcqRel);
    }

    pub fn is_playing(&self) -> bool {
        !unpack(self.word.load(Ordering::Acquire)).1
    }

    pub fn position(&self) -> usize {
        unpack(self.word.load(Ordering::Acquire)).0
    }

    /// Reader side: next sample of `buffer`, or `None` while silent.
    /// Running off the end pauses the cursor, unless a rewind got there
    /// first.
    pub fn next_sample(&self, buffer: &[i16]) -> Option<i16> {
        loop {
            let word = self.word.load(Ordering::Acquire);
            let (position, paused) = unpack(word);
            if paused {
                return None;
            }
            let (next, sample) = match buffer.get(position) {
                Some(&sample) => (word + 2, Some(sample)),
                None => (word | PAUSED, None),
            };
            if self
                .word
                .compare_exchange(word, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return sample;
            }
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

/// The game-facing side of the audio collaborator.
pub trait AudioOut {
    fn play(&mut self, cue: Cue);
    /// Cut off whatever is playing.
    fn silence(&mut self);
}

/// Used when sound is unavailable for the session.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioOut for Silent {
    fn play(&mut self, _cue: Cue) {}
    fn silence(&mut self) {}
}

/// Drives a cursor over the explosion buffer.  The device (if any) reads
/// the same cursor from its own thread.
#[derive(Debug)]
pub struct CuePlayer {
    explosion: CueBuffer,
    cursor: CueCursor,
}

impl CuePlayer {
    pub fn new(explosion: CueBuffer) -> Self {
        Self {
            explosion,
            cursor: CueCursor::new(),
        }
    }

    pub fn cursor(&self) -> &CueCursor {
        &self.cursor
    }

    pub fn buffer(&self) -> &CueBuffer {
        &self.explosion
    }
}

impl AudioOut for CuePlayer {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Explosion if !self.explosion.is_empty() => self.cursor.rewind(),
            Cue::Explosion => {}
        }
    }

    fn silence(&mut self) {
        self.cursor.pause();
    }
}

// ── Device ────────────────────────────────────────────────────────────────────

#[cfg(feature = "audio")]
mod device {
    use std::time::Duration;

    use rodio::{OutputStream, Sink, Source};

    use super::{AudioError, AudioOut, CueBuffer, CueCursor, CuePlayer};
    use crate::entities::Cue;

    /// Endless source: the cue while the cursor plays, silence otherwise.
    struct CueSource {
        buffer: CueBuffer,
        cursor: CueCursor,
    }

    impl Iterator for CueSource {
        type Item = i16;

        fn next(&mut self) -> Option<i16> {
            Some(self.cursor.next_sample(self.buffer.samples()).unwrap_or(0))
        }
    }

    impl Source for CueSource {
        fn current_frame_len(&self) -> Option<usize> {
            None
        }

        fn channels(&self) -> u16 {
            self.buffer.channels()
        }

        fn sample_rate(&self) -> u32 {
            self.buffer.sample_rate()
        }

        fn total_duration(&self) -> Option<Duration> {
            None
        }
    }

    pub struct DeviceOutput {
        player: CuePlayer,
        _sink: Sink,
        _stream: OutputStream,
    }

    impl DeviceOutput {
        pub fn open(player: CuePlayer) -> Result<Self, AudioError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|err| AudioError::Device(err.to_string()))?;
            let sink = Sink::try_new(&handle).map_err(|err| AudioError::Device(err.to_string()))?;
            sink.append(CueSource {
                buffer: player.buffer().clone(),
                cursor: player.cursor().clone(),
            });
            Ok(Self {
                player,
                _sink: sink,
                _stream: stream,
            })
        }
    }

    impl AudioOut for DeviceOutput {
        fn play(&mut self, cue: Cue) {
            self.player.play(cue);
        }

        fn silence(&mut self) {
            self.player.silence();
        }
    }
}

#[cfg(feature = "audio")]
fn open_device(player: CuePlayer) -> Result<Box<dyn AudioOut>, AudioError> {
    Ok(Box::new(device::DeviceOutput::open(player)?))
}

#[cfg(not(feature = "audio"))]
fn open_device(_player: CuePlayer) -> Result<Box<dyn AudioOut>, AudioError> {
    Err(AudioError::Unsupported)
}

/// Load the explosion cue and open the device.  Any failure is logged
/// once and yields a silent output; sound never stops the game.
pub fn open(explosion: Option<&Path>) -> Box<dyn AudioOut> {
    let buffer = match explosion {
        Some(path) => match CueBuffer::from_wav(path) {
            Ok(buffer) => buffer,
            Err(err) => {
                warn!("{}: {err}; sound disabled", path.display());
                return Box::new(Silent);
            }
        },
        None => CueBuffer::synthesized(),
    };

    match open_device(CuePlayer::new(buffer)) {
        Ok(output) => {
            info!("audio device open");
            output
        }
        Err(err) => {
            warn!("{err}; sound disabled");
            Box::new(Silent)
        }
    }
}
