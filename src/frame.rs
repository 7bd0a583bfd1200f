/// Draw calls over the sprite atlas.
///
/// The simulation never touches pixels.  Each tick it fills a `Frame`
/// with blits in draw order (background, skyline, actors, overlays, UI)
/// and hands it to whatever presents it.

use crate::consts::{HEIGHT, STOREY_HEIGHT, STOREY_WIDTH, WIDTH};

/// Axis-aligned rectangle in atlas or screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Atlas column of digit `0`; digits sit side by side 13px apart.
const DIGIT_ATLAS_X: i32 = 67;
const DIGIT_ATLAS_STRIDE: i32 = 13;
/// On-screen advance per scoreboard digit.
pub const DIGIT_WIDTH: i32 = 11;

/// Everything the atlas holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Background,
    /// The alternate frame is shown on a random flicker and while paused.
    Moon { flicker: bool },
    ScoreLabel,
    Digit(u8),
    /// One storey of building texture `style`.
    Storey { style: u8 },
    Plane { paused: bool },
    Bomb,
    Explosion,
    PauseGlyph,
    Title,
    Instructions,
    Credits,
    LoseBanner,
    WinBanner,
}

impl Sprite {
    /// Source region inside the atlas.
    pub fn region(self) -> Rect {
        match self {
            Sprite::Background => Rect::new(0, HEIGHT, WIDTH, HEIGHT),
            Sprite::Moon { flicker: false } => Rect::new(328, 0, 75, 99),
            Sprite::Moon { flicker: true } => Rect::new(403, 0, 75, 99),
            Sprite::ScoreLabel => Rect::new(0, 0, 64, 32),
            Sprite::Digit(d) => Rect::new(
                DIGIT_ATLAS_X + DIGIT_ATLAS_STRIDE * i32::from(d.min(9)),
                0,
                DIGIT_WIDTH,
                32,
            ),
            Sprite::Storey { style } => Rect::new(
                328 + STOREY_WIDTH * i32::from(style),
                99,
                STOREY_WIDTH,
                STOREY_HEIGHT,
            ),
            Sprite::Plane { paused: false } => Rect::new(200, 0, 67, 40),
            Sprite::Plane { paused: true } => Rect::new(528, 0, 67, 40),
            Sprite::Bomb => Rect::new(267, 0, 20, 30),
            Sprite::Explosion => Rect::new(0, 32, 128, 120),
            Sprite::PauseGlyph => Rect::new(478, 0, 50, 50),
            Sprite::Title => Rect::new(237, 327, 353, 95),
            Sprite::Instructions => Rect::new(0, 327, 236, 87),
            Sprite::Credits => Rect::new(244, 422, 388, 55),
            Sprite::LoseBanner => Rect::new(0, 153, 559, 86),
            Sprite::WinBanner => Rect::new(0, 239, 548, 88),
        }
    }
}

/// Place `sprite` with its top-left corner at (`x`, `y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub sprite: Sprite,
    pub x: i32,
    pub y: i32,
}

/// A draw call cut down to the presentable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blit {
    pub src: Rect,
    pub dst: Rect,
}

impl DrawCall {
    /// Clip against the screen.  `None` when nothing would be visible.
    pub fn clipped(&self) -> Option<Blit> {
        let region = self.sprite.region();
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = (self.x + region.w).min(WIDTH);
        let bottom = (self.y + region.h).min(HEIGHT);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Blit {
            src: Rect::new(
                region.x + (left - self.x),
                region.y + (top - self.y),
                right - left,
                bottom - top,
            ),
            dst: Rect::new(left, top, right - left, bottom - top),
        })
    }
}

/// One tick's worth of draw calls, in order.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    calls: Vec<DrawCall>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn blit(&mut self, sprite: Sprite, x: i32, y: i32) {
        self.calls.push(DrawCall { sprite, x, y });
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.calls.iter().map(|call| call.sprite)
    }

    pub fn contains(&self, sprite: Sprite) -> bool {
        self.sprites().any(|s| s == sprite)
    }

    /// First draw call for `sprite`, if any.
    pub fn find(&self, sprite: Sprite) -> Option<&DrawCall> {
        self.calls.iter().find(|call| call.sprite == sprite)
    }
}
