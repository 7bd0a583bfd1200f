use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use blitz::audio::*;
use blitz::entities::Cue;

fn drain(cursor: &CueCursor, buffer: &[i16]) -> Vec<i16> {
    std::iter::from_fn(|| cursor.next_sample(buffer)).collect()
}

// ── Cursor ────────────────────────────────────────────────────────────────────

#[test]
fn cursor_starts_silent() {
    let cursor = CueCursor::new();
    assert!(!cursor.is_playing());
    assert_eq!(cursor.next_sample(&[1, 2, 3]), None);
    assert_eq!(cursor.position(), 0);
}

#[test]
fn rewind_plays_the_buffer_once_then_pauses() {
    let buffer = [10, 20, 30];
    let cursor = CueCursor::new();
    cursor.rewind();
    assert!(cursor.is_playing());

    assert_eq!(drain(&cursor, &buffer), vec![10, 20, 30]);
    assert!(!cursor.is_playing());
    assert_eq!(cursor.next_sample(&buffer), None);
}

#[test]
fn rewind_mid_cue_restarts_from_first_sample() {
    let buffer = [1, 2, 3, 4, 5];
    let cursor = CueCursor::new();
    cursor.rewind();
    assert_eq!(cursor.next_sample(&buffer), Some(1));
    assert_eq!(cursor.next_sample(&buffer), Some(2));

    cursor.rewind();
    assert_eq!(drain(&cursor, &buffer), vec![1, 2, 3, 4, 5]);
}

#[test]
fn pause_silences_without_moving() {
    let buffer = [1, 2, 3];
    let cursor = CueCursor::new();
    cursor.rewind();
    assert_eq!(cursor.next_sample(&buffer), Some(1));

    cursor.pause();
    assert_eq!(cursor.next_sample(&buffer), None);
    assert_eq!(cursor.position(), 1);
}

#[test]
fn reader_thread_sees_whole_cue() {
    let buffer: Vec<i16> = (0..2_000).collect();
    let cursor = CueCursor::new();
    let reader = cursor.clone();
    cursor.rewind();

    let samples = {
        let buffer = buffer.clone();
        thread::spawn(move || drain(&reader, &buffer))
            .join()
            .expect("reader thread")
    };

    assert_eq!(samples, buffer);
    assert!(!cursor.is_playing());
}

#[test]
fn every_rewind_is_heard_in_full() {
    const PLAYS: usize = 200;
    let buffer: Vec<i16> = (1..=8).collect();
    let cursor = CueCursor::new();
    let stop = Arc::new(AtomicBool::new(false));

    let reader = {
        let cursor = cursor.clone();
        let buffer = buffer.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut heard = 0;
            while !stop.load(Ordering::Acquire) {
                match cursor.next_sample(&buffer) {
                    Some(_) => heard += 1,
                    None => thread::yield_now(),
                }
            }
            heard
        })
    };

    for play in 0..PLAYS {
        cursor.rewind();
        let deadline = Instant::now() + Duration::from_secs(2);
        while cursor.is_playing() {
            assert!(Instant::now() < deadline, "play {play} never finished");
            thread::yield_now();
        }
        // Paused at the end of the buffer, not by a stale pause at the start.
        assert_eq!(cursor.position(), buffer.len(), "play {play} was cut short");
    }

    stop.store(true, Ordering::Release);
    let heard = reader.join().expect("reader thread");
    assert_eq!(heard, PLAYS * buffer.len());
}

#[test]
fn exhausted_cursor_replays_after_rewind() {
    let buffer = [4, 5];
    let cursor = CueCursor::new();
    cursor.rewind();
    assert_eq!(drain(&cursor, &buffer), vec![4, 5]);
    assert_eq!(cursor.position(), 2);

    cursor.rewind();
    assert!(cursor.is_playing());
    assert_eq!(cursor.position(), 0);
    assert_eq!(drain(&cursor, &buffer), vec![4, 5]);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_rewinds_on_explosion_and_pauses_on_silence() {
    let mut player = CuePlayer::new(CueBuffer::new(vec![7; 16], 1, 8_000));
    assert!(!player.cursor().is_playing());

    player.play(Cue::Explosion);
    assert!(player.cursor().is_playing());
    assert_eq!(player.cursor().next_sample(player.buffer().samples()), Some(7));

    player.silence();
    assert!(!player.cursor().is_playing());

    player.play(Cue::Explosion);
    assert_eq!(player.cursor().position(), 0);
}

#[test]
fn player_with_empty_cue_stays_silent() {
    let mut player = CuePlayer::new(CueBuffer::new(Vec::new(), 1, 8_000));
    player.play(Cue::Explosion);
    assert!(!player.cursor().is_playing());
}

#[test]
fn synthesized_cue_is_a_short_mono_burst() {
    let cue = CueBuffer::synthesized();
    assert!(!cue.is_empty());
    assert_eq!(cue.channels(), 1);
    assert_eq!(cue.sample_rate(), 22_050);
    assert_eq!(cue.len(), cue.samples().len());
    assert!(cue.samples().iter().any(|&s| s != 0));
    // Same burst every time.
    assert_eq!(cue.samples(), CueBuffer::synthesized().samples());
}

#[test]
fn zero_channels_is_treated_as_mono() {
    let cue = CueBuffer::new(vec![0; 4], 0, 8_000);
    assert_eq!(cue.channels(), 1);
}

// ── Opening ───────────────────────────────────────────────────────────────────

#[test]
fn missing_cue_file_is_an_io_error() {
    let err = CueBuffer::from_wav(Path::new("/no/such/explosion.wav")).unwrap_err();
    assert!(matches!(err, AudioError::Io(_)));
}

#[test]
fn open_falls_back_to_silence() {
    let mut out = open(Some(Path::new("/no/such/explosion.wav")));
    out.play(Cue::Explosion);
    out.silence();
}
