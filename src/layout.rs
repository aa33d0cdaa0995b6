//! Screen layout in absolute logical coordinates, plus the mapping between
//! the logical surface and the terminal's character grid.

use crate::entities::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Text placement ────────────────────────────────────────────────────────────

pub const TITLE_Y: i32 = 100;
pub const HUD_POS: (i32, i32) = (10, 10);
pub const INSTRUCTIONS_Y: i32 = 150;
pub const INSTRUCTIONS_STEP: i32 = 40;
pub const END_TITLE_Y: i32 = 200;
pub const END_SCORE_Y: i32 = 300;
pub const HIGH_SCORE_Y: i32 = SCREEN_HEIGHT / 2;

pub const HOW_TO_PLAY_LINES: [&str; 6] = [
    "HOW TO PLAY",
    "Move Left: Left Arrow",
    "Move Right: Right Arrow",
    "Shoot: Spacebar",
    "Destroy enemies to score points!",
    "Press any key to go back",
];

// ── Buttons ───────────────────────────────────────────────────────────────────

pub const BUTTON_SIZE: (i32, i32) = (200, 50);
const BUTTON_X: i32 = SCREEN_WIDTH / 2 - BUTTON_SIZE.0 / 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Start,
    HowToPlay,
    HighScores,
    Restart,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
    pub rect: Rect,
}

const fn button(label: &'static str, action: ButtonAction, y: i32) -> Button {
    Button {
        label,
        action,
        rect: Rect::new(BUTTON_X, y, BUTTON_SIZE.0, BUTTON_SIZE.1),
    }
}

pub const MAIN_MENU_BUTTONS: [Button; 4] = [
    button("Start Game", ButtonAction::Start, 200),
    button("How to Play", ButtonAction::HowToPlay, 270),
    button("High Scores", ButtonAction::HighScores, 340),
    button("Exit", ButtonAction::Exit, 410),
];

/// Shared by the Game-Over and Victory screens.
pub const END_SCREEN_BUTTONS: [Button; 2] = [
    button("Restart", ButtonAction::Restart, 450),
    button("Exit", ButtonAction::Exit, 520),
];

/// The first button claimed by a clicked logical area (see [`area_claims`]).
/// A single-unit area behaves like a point click.
pub fn button_at(buttons: &[Button], area: &Rect) -> Option<ButtonAction> {
    buttons.iter().find(|b| area_claims(area, &b.rect)).map(|b| b.action)
}

/// Whether a grid cell's logical `area` belongs to `target`.  Per axis, the
/// cell belongs when its midpoint lies inside the target, or when the cell
/// covers the target's midpoint.  The second rule keeps a target thinner
/// than a cell reachable.
pub fn area_claims(area: &Rect, target: &Rect) -> bool {
    axis_claims(area.left(), area.right(), target.left(), target.right())
        && axis_claims(area.top(), area.bottom(), target.top(), target.bottom())
}

fn axis_claims(lo: i32, hi: i32, start: i32, end: i32) -> bool {
    let mid = lo + (hi - lo) / 2;
    let target_mid = start + (end - start) / 2;
    (start <= mid && mid < end) || (lo <= target_mid && target_mid < hi)
}

/// Keyboard shortcut: the 1-based index of a button.
pub fn button_for_digit(buttons: &[Button], digit: char) -> Option<ButtonAction> {
    let index = digit.to_digit(10)? as usize;
    if index == 0 {
        return None;
    }
    buttons.get(index - 1).map(|b| b.action)
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The terminal grid the logical surface is stretched onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Cell containing a logical point, clamped to the grid.
    pub fn to_cell(&self, x: i32, y: i32) -> (u16, u16) {
        let col = scale_down(x, SCREEN_WIDTH, self.cols);
        let row = scale_down(y, SCREEN_HEIGHT, self.rows);
        (col, row)
    }

    /// Logical area a cell stands for.  Neighbouring cells tile the surface
    /// without gaps.
    pub fn cell_area(&self, col: u16, row: u16) -> Rect {
        let (x0, x1) = cell_bounds(col, SCREEN_WIDTH, self.cols);
        let (y0, y1) = cell_bounds(row, SCREEN_HEIGHT, self.rows);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Cells that draw `rect` as a clickable target, as
    /// `(col, row, width, height)`.  Clicking any of them lands on `rect`
    /// through [`area_claims`].
    pub fn claimed_span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let (c0, c1) = claimed_cells(self.cols, SCREEN_WIDTH, rect.left(), rect.right())?;
        let (r0, r1) = claimed_cells(self.rows, SCREEN_HEIGHT, rect.top(), rect.bottom())?;
        Some((c0, r0, c1 - c0 + 1, r1 - r0 + 1))
    }

    /// Cells covered by `rect` as `(col, row, width, height)`, clipped to the
    /// grid.  Anything visible occupies at least one cell; `None` when the
    /// rect lies fully off-screen.
    pub fn cell_span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.right() <= 0
            || rect.bottom() <= 0
            || rect.left() >= SCREEN_WIDTH
            || rect.top() >= SCREEN_HEIGHT
        {
            return None;
        }
        let (c0, r0) = self.to_cell(rect.left(), rect.top());
        let (c1, r1) = self.to_cell(rect.right() - 1, rect.bottom() - 1);
        Some((c0, r0, c1 - c0 + 1, r1 - r0 + 1))
    }
}

fn scale_down(value: i32, extent: i32, cells: u16) -> u16 {
    let clamped = value.clamp(0, extent - 1) as i64;
    (clamped * cells as i64 / extent as i64) as u16
}

fn cell_bounds(index: u16, extent: i32, cells: u16) -> (i32, i32) {
    let lo = index as i64 * extent as i64 / cells as i64;
    let hi = (index as i64 + 1) * extent as i64 / cells as i64;
    (lo as i32, hi as i32)
}

/// First and last cell along one axis claimed by `[start, end)`.
fn claimed_cells(cells: u16, extent: i32, start: i32, end: i32) -> Option<(u16, u16)> {
    let mut claimed = (0..cells).filter(|&i| {
        let (lo, hi) = cell_bounds(i, extent, cells);
        lo < hi && axis_claims(lo, hi, start, end)
    });
    let first = claimed.next()?;
    let last = claimed.last().unwrap_or(first);
    Some((first, last))
}
