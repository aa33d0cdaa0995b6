//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! app.  No game logic is performed; this module only translates logical
//! coordinates onto the terminal grid and queues the commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::entities::{Rect, SessionState};
use space_shooter::layout::{
    Button, Viewport, END_SCORE_Y, END_SCREEN_BUTTONS, END_TITLE_Y, HIGH_SCORE_Y, HOW_TO_PLAY_LINES,
    HUD_POS, INSTRUCTIONS_STEP, INSTRUCTIONS_Y, MAIN_MENU_BUTTONS, TITLE_Y,
};
use space_shooter::screens::{App, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::White;
const C_TEXT: Color = Color::White;
const C_BUTTON_FACE: Color = Color::White;
const C_BUTTON_LABEL: Color = Color::Black;
const C_HUD: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of whichever screen is active.
pub fn render<W: Write>(out: &mut W, app: &App, vp: Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match app.screen() {
        Screen::MainMenu => {
            draw_centered(out, vp, "SPACE SHOOTER", TITLE_Y, C_TITLE)?;
            draw_buttons(out, vp, &MAIN_MENU_BUTTONS)?;
        }
        Screen::HowToPlay => {
            for (i, line) in HOW_TO_PLAY_LINES.iter().enumerate() {
                let y = INSTRUCTIONS_Y + i as i32 * INSTRUCTIONS_STEP;
                draw_centered(out, vp, line, y, C_TEXT)?;
            }
        }
        Screen::HighScores { high_score } => {
            let text = format!("High Score: {}", high_score);
            draw_centered(out, vp, &text, HIGH_SCORE_Y, C_TEXT)?;
        }
        Screen::Playing(session) => {
            draw_session(out, vp, session)?;
            draw_hud(out, vp, session.score, app.high_score())?;
            draw_controls_hint(out, vp)?;
        }
        Screen::GameOver { score } => draw_end_screen(out, vp, "GAME OVER", *score)?,
        Screen::Victory { score } => draw_end_screen(out, vp, "CONGRATULATIONS!", *score)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Text & buttons ────────────────────────────────────────────────────────────

/// Horizontally centred text on the row holding logical `y`.
fn draw_centered<W: Write>(
    out: &mut W,
    vp: Viewport,
    text: &str,
    y: i32,
    color: Color,
) -> std::io::Result<()> {
    let (_, row) = vp.to_cell(0, y);
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_buttons<W: Write>(out: &mut W, vp: Viewport, buttons: &[Button]) -> std::io::Result<()> {
    for (i, button) in buttons.iter().enumerate() {
        let Some((col, row, w, h)) = vp.claimed_span(&button.rect) else {
            continue;
        };
        out.queue(style::SetBackgroundColor(C_BUTTON_FACE))?;
        for r in row..row + h {
            out.queue(cursor::MoveTo(col, r))?;
            out.queue(Print(" ".repeat(w as usize)))?;
        }

        // "[1] Start Game": the digit is also a keyboard shortcut
        let label = format!("[{}] {}", i + 1, button.label);
        let label_row = row + (h - 1) / 2;
        let label_col = (col + w / 2).saturating_sub(label.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(label_col, label_row))?;
        out.queue(style::SetForegroundColor(C_BUTTON_LABEL))?;
        out.queue(Print(&label))?;
        out.queue(style::ResetColor)?;
    }
    Ok(())
}

fn draw_end_screen<W: Write>(
    out: &mut W,
    vp: Viewport,
    title: &str,
    score: u32,
) -> std::io::Result<()> {
    draw_centered(out, vp, title, END_TITLE_Y, C_TITLE)?;
    let score_line = format!("Your Score: {}", score);
    draw_centered(out, vp, &score_line, END_SCORE_Y, C_TEXT)?;
    draw_buttons(out, vp, &END_SCREEN_BUTTONS)
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_session<W: Write>(out: &mut W, vp: Viewport, session: &SessionState) -> std::io::Result<()> {
    for enemy in &session.enemies {
        draw_block(out, vp, &enemy.rect, "▓", C_ENEMY)?;
    }
    for bullet in &session.bullets {
        draw_block(out, vp, &bullet.rect, "║", C_BULLET)?;
    }
    draw_block(out, vp, &session.player.rect, "█", C_PLAYER)
}

/// Fill every cell `rect` covers with `glyph`.  Off-screen parts are clipped.
fn draw_block<W: Write>(
    out: &mut W,
    vp: Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, w, h)) = vp.cell_span(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat(w as usize);
    for r in row..row + h {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: Viewport, score: u32, high_score: u32) -> std::io::Result<()> {
    let (col, row) = vp.to_cell(HUD_POS.0, HUD_POS.1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Score: {}  High Score: {}", score, high_score)))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Ctrl+C : Quit"))?;
    Ok(())
}
