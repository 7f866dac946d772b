//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! One board cell is two terminal columns wide. An occupied cell is filled with
//! its piece color, with a light left edge as the border and a darker right
//! half as the inset shadow. Empty cells are black with a dim accent dot for the
//! grid.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_COLOR};

/// Dark red accent used for grid dots, frame and title.
const ACCENT: Rgb = Rgb::new(139, 0, 0);
const PANEL_GAP: u16 = 2;
const PANEL_WIDTH: u16 = 20;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Smallest viewport that shows the board frame and the side panel.
    pub fn required_viewport(&self) -> Viewport {
        let (frame_w, frame_h) = self.frame_size();
        Viewport::new(frame_w + PANEL_GAP + PANEL_WIDTH, frame_h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size();
        let content_w = self.required_viewport().width;
        let start_x = viewport.width.saturating_sub(content_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, start_x, start_y, x as u16, y as u16, *kind),
                    None => self.draw_empty(fb, start_x, start_y, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_block(fb, start_x, start_y, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, start_x + frame_w + PANEL_GAP, start_y);

        match snap.state {
            RunState::Running => {}
            RunState::Paused => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED", "P to resume"]);
            }
            RunState::GameOver => {
                let score = format!("Score {}", snap.score);
                let lines = format!("Lines {}", snap.lines);
                let level = format!("Level {}", snap.level);
                self.draw_overlay(
                    fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    &["GAME OVER", &score, &lines, &level, "R to restart"],
                );
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(ACCENT.scale(3, 2), EMPTY_COLOR);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn cell_origin(&self, start_x: u16, start_y: u16, x: u16, y: u16) -> (u16, u16) {
        (start_x + 1 + x * self.cell_w, start_y + 1 + y * self.cell_h)
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let (px, py) = self.cell_origin(start_x, start_y, x, y);
        let blank = CellStyle::new(ACCENT, EMPTY_COLOR);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', blank);
        fb.put_char(px, py, '·', blank.dim());
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, x, y);
        let color = kind.color();
        let border = CellStyle::new(color.blend(Rgb::new(255, 255, 255), 160), color);
        let shadow = CellStyle::new(color.scale(4, 5), color);

        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(color, color));
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, '▏', border);
            fb.put_char(px + self.cell_w - 1, py + dy, '▐', shadow);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, start_y: u16) {
        let title = CellStyle::new(ACCENT.scale(2, 1), EMPTY_COLOR).bold();
        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let help = CellStyle::default().dim();

        let mut y = start_y;
        fb.put_str(x, y, "TETRIS", title);
        y += 2;

        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &v.to_string(), value);
            y += 3;
        }

        fb.put_str(x, y, "CONTROLS", label);
        y += 1;
        for line in [
            "\u{2190} \u{2192}  move",
            "\u{2191}    rotate",
            "\u{2193}    soft drop",
            "space hard drop",
            "p    pause",
            "r    restart",
            "q    quit",
        ] {
            fb.put_str(x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), EMPTY_COLOR).bold();
        let top = start_y + frame_h.saturating_sub(lines.len() as u16) / 2;
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(text_w) / 2;
            let style = if i == 0 { style } else { CellStyle { bold: false, ..style } };
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;

    #[test]
    fn required_viewport_fits_board_and_panel() {
        let view = GameView::default();
        assert_eq!(view.required_viewport(), Viewport::new(44, 22));
    }

    #[test]
    fn empty_cells_show_grid_dots() {
        let view = GameView::default();
        let snap = GameSnapshot::default();
        let fb = view.render(&snap, view.required_viewport());
        // Bottom board row: border, then ten "· " pairs, then border.
        assert_eq!(fb.row_text(20).chars().take(22).collect::<String>(), format!("│{}│", "· ".repeat(10)));
    }

    #[test]
    fn active_piece_is_painted_in_its_color() {
        let view = GameView::default();
        let session = GameSession::new(5);
        let snap = session.snapshot();
        let active = snap.active.unwrap();
        let (x, y) = active.cells().find(|&(_, y)| y >= 0).unwrap();

        let fb = view.render(&snap, view.required_viewport());
        let glyph = fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap();
        assert_eq!(glyph.style.bg, active.kind.color());
    }
}
