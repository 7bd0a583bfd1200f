use blitz::compute::*;
use blitz::consts::*;
use blitz::entities::*;
use blitz::frame::{Blit, DrawCall, Frame, Rect, Sprite, DIGIT_WIDTH};
use blitz::grid::WorldGrid;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn playing(heights: [u32; GRID_COLUMNS]) -> Game {
    let mut game = init_game(true);
    game.state = GameState::Play;
    game.previous = Some(GameState::Preplay);
    game.grid = WorldGrid::from_heights(heights);
    game
}

fn one_tick(game: &mut Game) -> Frame {
    let mut frame = Frame::new();
    tick(game, &mut frame, &mut StdRng::seed_from_u64(1));
    frame
}

// ── Clipping ──────────────────────────────────────────────────────────────────

#[test]
fn fully_visible_call_is_untouched() {
    let call = DrawCall { sprite: Sprite::Bomb, x: 100, y: 200 };
    let blit = call.clipped().expect("visible");
    assert_eq!(blit.src, Sprite::Bomb.region());
    assert_eq!(blit.dst, Rect::new(100, 200, 20, 30));
}

#[test]
fn partially_visible_call_is_cut_on_both_edges() {
    let call = DrawCall { sprite: Sprite::Explosion, x: -50, y: 400 };
    assert_eq!(
        call.clipped(),
        Some(Blit {
            src: Rect::new(50, 32, 78, 80),
            dst: Rect::new(0, 400, 78, 80),
        })
    );
}

#[test]
fn offscreen_call_is_dropped() {
    let wrapped_plane = DrawCall { sprite: Sprite::Plane { paused: false }, x: PLANE_WRAP_X, y: 10 };
    assert_eq!(wrapped_plane.clipped(), None);

    let sunk = DrawCall { sprite: Sprite::Storey { style: 0 }, x: 0, y: HEIGHT };
    assert_eq!(sunk.clipped(), None);
}

#[test]
fn atlas_regions_match_the_sheet() {
    assert_eq!(Sprite::Digit(0).region(), Rect::new(67, 0, 11, 32));
    assert_eq!(Sprite::Digit(9).region(), Rect::new(184, 0, 11, 32));
    assert_eq!(Sprite::Storey { style: 3 }.region(), Rect::new(388, 99, 20, 20));
    assert_eq!(Sprite::Background.region(), Rect::new(0, HEIGHT, WIDTH, HEIGHT));
}

// ── Composition ───────────────────────────────────────────────────────────────

#[test]
fn play_draws_back_to_front() {
    let mut heights = [0; GRID_COLUMNS];
    heights[2] = 2;
    let mut game = playing(heights);
    handle_action(&mut game, Action::Generic);

    one_tick(&mut game);
    let frame = one_tick(&mut game);

    let calls = frame.calls();
    assert_eq!(calls.len(), 7);
    assert_eq!(calls[0].sprite, Sprite::Background);
    assert!(matches!(calls[1].sprite, Sprite::Moon { .. }));
    assert_eq!(calls[2].sprite, Sprite::ScoreLabel);
    assert_eq!((calls[3].x, calls[3].y), (40, HEIGHT - STOREY_HEIGHT));
    assert_eq!((calls[4].x, calls[4].y), (40, HEIGHT - 2 * STOREY_HEIGHT));
    assert!(matches!(calls[3].sprite, Sprite::Storey { .. }));
    assert_eq!(calls[5].sprite, Sprite::Plane { paused: false });
    assert_eq!(calls[6].sprite, Sprite::Bomb);
}

#[test]
fn idle_bomb_is_not_drawn() {
    let mut game = playing([0; GRID_COLUMNS]);
    let frame = one_tick(&mut game);
    assert!(!frame.contains(Sprite::Bomb));
}

#[test]
fn scoreboard_digits_follow_the_label() {
    let mut game = playing([0; GRID_COLUMNS]);
    game.score.award(120);

    let frame = one_tick(&mut game);

    let digits: Vec<_> = frame
        .calls()
        .iter()
        .filter(|call| matches!(call.sprite, Sprite::Digit(_)))
        .map(|call| (call.sprite, call.x))
        .collect();
    assert_eq!(
        digits,
        vec![
            (Sprite::Digit(1), 70 + DIGIT_WIDTH),
            (Sprite::Digit(2), 70 + 2 * DIGIT_WIDTH),
            (Sprite::Digit(0), 70 + 3 * DIGIT_WIDTH),
        ]
    );
}

#[test]
fn zero_score_draws_no_digits() {
    let mut game = playing([0; GRID_COLUMNS]);
    let frame = one_tick(&mut game);
    assert!(frame.contains(Sprite::ScoreLabel));
    assert!(!frame.sprites().any(|s| matches!(s, Sprite::Digit(_))));
}

#[test]
fn pause_frame_overlays_the_glyph() {
    let mut game = playing([0; GRID_COLUMNS]);
    handle_action(&mut game, Action::TogglePause);

    let frame = one_tick(&mut game);

    let glyph = frame.find(Sprite::PauseGlyph).expect("pause glyph");
    assert_eq!((glyph.x, glyph.y), (295, 220));
    assert_eq!(frame.calls().last().map(|c| c.sprite), Some(Sprite::PauseGlyph));
    assert!(frame.contains(Sprite::Moon { flicker: true }));
}

#[test]
fn first_level_skyline_rises_into_place() {
    let mut game = init_game(true);
    game.state = GameState::Play;
    game.grid = WorldGrid::generate(1, &mut StdRng::seed_from_u64(5));
    let rise = game.grid.rise_offset();
    assert!(rise > 0);

    let frame = one_tick(&mut game);

    let bottom = frame
        .calls()
        .iter()
        .find(|call| matches!(call.sprite, Sprite::Storey { .. }))
        .expect("storey");
    assert_eq!(bottom.y, HEIGHT - STOREY_HEIGHT + rise);
    assert_eq!(game.grid.rise_offset(), rise - RISE_STEP);
}

fn storey_ys(frame: &Frame) -> Vec<i32> {
    frame
        .calls()
        .iter()
        .filter(|call| matches!(call.sprite, Sprite::Storey { .. }))
        .map(|call| call.y)
        .collect()
}

#[test]
fn strike_shake_moves_the_skyline() {
    let mut heights = [0; GRID_COLUMNS];
    heights[5] = 2;
    heights[9] = 2;
    let mut game = playing(heights);
    game.plane.pos.x = 5 * STOREY_WIDTH;
    handle_action(&mut game, Action::Generic);
    while game.state == GameState::Play {
        one_tick(&mut game);
    }
    assert_eq!(game.state, GameState::Strike);

    // Column 5 is down to one storey, column 9 still has two.
    let resting = vec![
        HEIGHT - STOREY_HEIGHT,
        HEIGHT - STOREY_HEIGHT,
        HEIGHT - 2 * STOREY_HEIGHT,
    ];
    let mut shaken = false;
    while game.state == GameState::Strike {
        let shake = game.strike.shake();
        let frame = one_tick(&mut game);
        let expected: Vec<i32> = resting.iter().map(|y| y - shake).collect();
        assert_eq!(storey_ys(&frame), expected);
        shaken |= shake != 0;
    }
    assert!(shaken);

    assert_eq!(game.state, GameState::Play);
    assert_eq!(game.strike.shake(), 0);
    assert_eq!(storey_ys(&one_tick(&mut game)), resting);
}

#[test]
fn win_frame_shows_the_banner_over_the_scene() {
    let mut game = playing([0; GRID_COLUMNS]);
    game.state = GameState::Win;
    let frame = one_tick(&mut game);
    assert!(frame.contains(Sprite::WinBanner));
    assert!(!frame.contains(Sprite::Plane { paused: false }));
}
