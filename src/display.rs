/// Rendering layer: all terminal I/O lives here.
///
/// A composed `Frame` is painted onto a cell canvas (one cell per 10×20
/// atlas pixels, so one storey is two cells wide and one row tall), then
/// the canvas is written out row by row.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use blitz::consts::{HEIGHT, WIDTH};
use blitz::entities::Game;
use blitz::frame::{Frame, Rect, Sprite};

const CELL_W: i32 = 10;
const CELL_H: i32 = 20;
pub const COLS: u16 = (WIDTH / CELL_W) as u16;
pub const ROWS: u16 = (HEIGHT / CELL_H) as u16;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::DarkGrey;
const C_MOON: Color = Color::Yellow;
const C_MOON_FLICKER: Color = Color::DarkYellow;
const C_SCORE: Color = Color::White;
const C_PLANE: Color = Color::White;
const C_PLANE_PAUSED: Color = Color::DarkGrey;
const C_BOMB: Color = Color::Red;
const C_EXPLOSION: Color = Color::Yellow;
const C_TITLE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_LOSE: Color = Color::Red;
const C_WIN: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;
const C_STOREY: [Color; 4] = [Color::Grey, Color::DarkCyan, Color::DarkYellow, Color::DarkMagenta];

// ── Sprite art ────────────────────────────────────────────────────────────────
// Spaces are transparent.

const MOON: &[&str] = &[
    "  ___  ",
    " /   \\ ",
    "|  o  |",
    " \\___/ ",
];
const SCORE_LABEL: &[&str] = &["SCORE"];
const STOREY: [&[&str]; 4] = [&["▓▓"], &["▒▒"], &["██"], &["░░"]];
const PLANE: &[&str] = &[
    "|\\___  ",
    "|=[__]>",
];
const BOMB: &[&str] = &["||", "\\/"];
const EXPLOSION: &[&str] = &[
    "   \\  |  /",
    " --  \\|/  --",
    "  *  -O-  *",
    " --  /|\\  --",
    "   /  |  \\",
];
const PAUSE_GLYPH: &[&str] = &["█ █", "█ █"];
const TITLE: &[&str] = &[
    " ____  _     _ _       ",
    "| __ )| |   (_) |_ ____",
    "|  _ \\| |   | | __|_  /",
    "| |_) | |___| | |_ / / ",
    "|____/|_____|_|\\__/___|",
];
const INSTRUCTIONS: &[&str] = &[
    "Any key  start / bomb",
    "P        pause",
    "S        sound on/off",
    "Esc      menu / quit",
];
const CREDITS: &[&str] = &["Free software under the GNU GPL"];
const LOSE_BANNER: &[&str] = &[
    "╔══════════════════════════════════════════════════╗",
    "║       YOU CRASHED  -  press any key for menu     ║",
    "╚══════════════════════════════════════════════════╝",
];
const WIN_BANNER: &[&str] = &[
    "╔══════════════════════════════════════════════════╗",
    "║   CITY FLATTENED  -  press any key, next level   ║",
    "╚══════════════════════════════════════════════════╝",
];

fn art(sprite: Sprite) -> (&'static [&'static str], Color) {
    match sprite {
        Sprite::Background => (&[], C_SKY),
        Sprite::Moon { flicker } => (MOON, if flicker { C_MOON_FLICKER } else { C_MOON }),
        Sprite::ScoreLabel => (SCORE_LABEL, C_SCORE),
        Sprite::Digit(_) => (&[], C_SCORE),
        Sprite::Storey { style } => {
            let style = usize::from(style) % STOREY.len();
            (STOREY[style], C_STOREY[style])
        }
        Sprite::Plane { paused } => (PLANE, if paused { C_PLANE_PAUSED } else { C_PLANE }),
        Sprite::Bomb => (BOMB, C_BOMB),
        Sprite::Explosion => (EXPLOSION, C_EXPLOSION),
        Sprite::PauseGlyph => (PAUSE_GLYPH, C_TEXT),
        Sprite::Title => (TITLE, C_TITLE),
        Sprite::Instructions => (INSTRUCTIONS, C_TEXT),
        Sprite::Credits => (CREDITS, C_HINT),
        Sprite::LoseBanner => (LOSE_BANNER, C_LOSE),
        Sprite::WinBanner => (WIN_BANNER, C_WIN),
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: C_SKY };

pub struct Screen {
    cells: Vec<Cell>,
    /// Top-left of the board inside the terminal; the board is centred.
    left: u16,
    top: u16,
}

impl Screen {
    /// `None` when the terminal cannot hold the board.
    pub fn fit(term_cols: u16, term_rows: u16) -> Option<Self> {
        if term_cols < COLS || term_rows < ROWS {
            return None;
        }
        Some(Self {
            cells: vec![BLANK; usize::from(COLS) * usize::from(ROWS)],
            left: (term_cols - COLS) / 2,
            top: (term_rows - ROWS) / 2,
        })
    }

    /// Paint `frame` and write it out, with a status line under the board.
    pub fn present<W: Write>(&mut self, out: &mut W, frame: &Frame, game: &Game) -> std::io::Result<()> {
        self.paint(frame);

        for row in 0..ROWS {
            out.queue(cursor::MoveTo(self.left, self.top + row))?;
            let start = usize::from(row) * usize::from(COLS);
            let mut color = None;
            for cell in &self.cells[start..start + usize::from(COLS)] {
                if color != Some(cell.color) {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    color = Some(cell.color);
                }
                out.queue(Print(cell.ch))?;
            }
        }

        draw_status(out, game, self.left, self.top + ROWS)?;

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }

    fn paint(&mut self, frame: &Frame) {
        self.cells.fill(BLANK);
        for call in frame.calls() {
            let Some(blit) = call.clipped() else {
                continue;
            };
            let window = cell_window(blit.dst);
            let origin = (call.x.div_euclid(CELL_W), call.y.div_euclid(CELL_H));
            match call.sprite {
                Sprite::Background => self.paint_stars(window),
                Sprite::Digit(d) => {
                    let ch = char::from(b'0' + d.min(9));
                    self.put(origin.0, origin.1, window, Cell { ch, color: C_SCORE });
                }
                sprite => {
                    let (lines, color) = art(sprite);
                    for (dy, line) in lines.iter().enumerate() {
                        for (dx, ch) in line.chars().enumerate() {
                            if ch != ' ' {
                                let cell = Cell { ch, color };
                                self.put(origin.0 + dx as i32, origin.1 + dy as i32, window, cell);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Fixed scatter of stars over the sky.
    fn paint_stars(&mut self, window: Rect) {
        for row in window.y..window.y + window.h {
            for col in window.x..window.x + window.w {
                if (col * 7 + row * 13) % 31 == 0 {
                    self.put(col, row, window, Cell { ch: '·', color: C_SKY });
                }
            }
        }
    }

    fn put(&mut self, col: i32, row: i32, window: Rect, cell: Cell) {
        let inside = col >= window.x
            && col < window.x + window.w
            && row >= window.y
            && row < window.y + window.h
            && (0..i32::from(COLS)).contains(&col)
            && (0..i32::from(ROWS)).contains(&row);
        if inside {
            self.cells[row as usize * usize::from(COLS) + col as usize] = cell;
        }
    }
}

/// Cells touched by a pixel rectangle, in cell units.
fn cell_window(dst: Rect) -> Rect {
    let left = dst.x / CELL_W;
    let top = dst.y / CELL_H;
    let right = (dst.x + dst.w + CELL_W - 1) / CELL_W;
    let bottom = (dst.y + dst.h + CELL_H - 1) / CELL_H;
    Rect::new(left, top, right - left, bottom - top)
}

// ── Status line ───────────────────────────────────────────────────────────────

fn draw_status<W: Write>(out: &mut W, game: &Game, left: u16, row: u16) -> std::io::Result<()> {
    let (_, term_rows) = crossterm::terminal::size()?;
    if row >= term_rows {
        return Ok(());
    }
    let sound = if game.sound_enabled { "on " } else { "off" };
    let line = format!(
        "Level {:<3} Sound {}   Any key: bomb  P: pause  S: sound  Esc: menu",
        game.level, sound
    );
    out.queue(cursor::MoveTo(left, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(line.chars().take(usize::from(COLS)).collect::<String>()))?;
    Ok(())
}
