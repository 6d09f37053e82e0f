use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::grid::{Cell, Geometry};
use crate::session::Session;
use crate::timer::Ticker;

pub const SNAKE_COLOR: Color = Color::Blue;
pub const FOOD_COLOR: Color = Color::LightGreen;
pub const BORDER_COLOR: Color = Color::Gray;
pub const TEXT_COLOR: Color = Color::White;

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const RESTART_TEXT: &str = "Press R to restart";

/// Terminal columns per grid cell; keeps cells roughly square.
const COLUMNS_PER_CELL: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Square,
    Circle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the left edge of this cell.
    TopLeft(Cell),
    /// Text is centred horizontally, `row_offset` rows below the middle row.
    Centered { row_offset: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub bold: bool,
}

impl TextStyle {
    pub const fn plain(color: Color) -> Self {
        TextStyle { color, bold: false }
    }

    pub const fn bold(color: Color) -> Self {
        TextStyle { color, bold: true }
    }
}

/// Something a frame can be drawn on. Drawing never feeds back into the game.
pub trait Surface {
    fn clear(&mut self);
    fn draw_cell(&mut self, cell: Cell, shape: Shape, color: Color);
    fn draw_text(&mut self, text: &str, anchor: TextAnchor, style: TextStyle);
}

/// Draws one frame of the session: score, snake, food, border, and the
/// game-over message with the restart prompt once the game has ended.
pub fn draw_frame<R: Rng, T: Ticker>(surface: &mut impl Surface, session: &Session<R, T>) {
    surface.clear();

    if let Some(game) = session.game() {
        surface.draw_text(
            &format!("Score: {}", game.score()),
            TextAnchor::TopLeft(Cell::new(2, 2)),
            TextStyle::plain(TEXT_COLOR),
        );
        for segment in game.snake().segments() {
            surface.draw_cell(segment, Shape::Square, SNAKE_COLOR);
        }
        surface.draw_cell(game.food().position(), Shape::Circle, FOOD_COLOR);
    }

    draw_border(surface, session.geometry());

    if session.is_game_over() {
        surface.draw_text(
            GAME_OVER_TEXT,
            TextAnchor::Centered { row_offset: 0 },
            TextStyle::bold(TEXT_COLOR),
        );
    }
    if session.restart_visible() {
        surface.draw_text(
            RESTART_TEXT,
            TextAnchor::Centered { row_offset: 2 },
            TextStyle::plain(TEXT_COLOR),
        );
    }
}

fn draw_border(surface: &mut impl Surface, geometry: &Geometry) {
    for cell in geometry.border_cells() {
        surface.draw_cell(cell, Shape::Square, BORDER_COLOR);
    }
}

/// [`Surface`] over a ratatui buffer. Grid cells are two columns wide and
/// anything falling outside `area` is clipped.
pub struct BufferSurface<'a> {
    area: Rect,
    geometry: Geometry,
    buf: &'a mut Buffer,
}

impl<'a> BufferSurface<'a> {
    pub fn new(area: Rect, geometry: Geometry, buf: &'a mut Buffer) -> Self {
        let area = area.intersection(buf.area);
        BufferSurface {
            area,
            geometry,
            buf,
        }
    }

    /// Terminal position for a column/row offset from the area origin.
    fn position(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= i32::from(self.area.width) || y >= i32::from(self.area.height) {
            return None;
        }
        Some((self.area.x + x as u16, self.area.y + y as u16))
    }
}

impl Surface for BufferSurface<'_> {
    fn clear(&mut self) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                self.buf[(x, y)].reset();
            }
        }
    }

    fn draw_cell(&mut self, cell: Cell, shape: Shape, color: Color) {
        let symbols = match shape {
            Shape::Square => ["█", "█"],
            Shape::Circle => ["●", " "],
        };
        for (i, symbol) in symbols.into_iter().enumerate() {
            let x = cell
                .col
                .saturating_mul(COLUMNS_PER_CELL)
                .saturating_add(i as i32);
            if let Some(pos) = self.position(x, cell.row) {
                self.buf[pos].set_symbol(symbol).set_fg(color);
            }
        }
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, style: TextStyle) {
        let width = text.chars().count() as i32;
        let (x, y) = match anchor {
            TextAnchor::TopLeft(cell) => (cell.col.saturating_mul(COLUMNS_PER_CELL), cell.row),
            TextAnchor::Centered { row_offset } => {
                let grid_columns = self
                    .geometry
                    .width()
                    .saturating_mul(COLUMNS_PER_CELL)
                    .min(i32::from(self.area.width));
                let grid_rows = self.geometry.height().min(i32::from(self.area.height));
                (
                    (grid_columns - width).max(0) / 2,
                    (grid_rows / 2).saturating_add(row_offset),
                )
            }
        };
        let Some((left, top)) = self.position(x, y) else {
            return;
        };

        let mut ratatui_style = Style::default().fg(style.color);
        if style.bold {
            ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
        }
        let max_width = usize::from(self.area.right() - left);
        self.buf.set_stringn(left, top, text, max_width, ratatui_style);
    }
}

impl<R: Rng, T: Ticker> Widget for &Session<R, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut surface = BufferSurface::new(area, *self.geometry(), buf);
        draw_frame(&mut surface, self);
    }
}
