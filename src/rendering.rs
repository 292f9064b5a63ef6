use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    style::{self, ResetColor, SetForegroundColor},
};
use log::info;

use crate::types::{Vector2D, rotate_point};

const LINE_CHAR: char = '#';
const POINT_CHAR: char = '*';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Yellow,
}

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => style::Color::Black,
            Color::White => style::Color::White,
            Color::Yellow => style::Color::Yellow,
        }
    }
}

/// Drawing surface the simulation renders into, in logical screen units.
pub trait Rasterizer {
    fn screen_width(&self) -> u32;
    fn screen_height(&self) -> u32;
    fn clear_screen(&mut self, color: Color);
    fn draw_point(&mut self, position: Vector2D, color: Color);
    fn draw_line(&mut self, from: Vector2D, to: Vector2D, color: Color);
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);
}

/// Draws `model` as a closed outline: every vertex is rotated, scaled and moved
/// to `position`, then joined to the next, and the last back to the first.
pub fn draw_wireframe_model(
    screen: &mut dyn Rasterizer,
    model: &[Vector2D],
    position: Vector2D,
    rotation: f64,
    scale: f64,
    color: Color,
) {
    let transformed: Vec<Vector2D> = model
        .iter()
        .map(|&vertex| rotate_point(vertex, rotation) * scale + position)
        .collect();

    for (i, &from) in transformed.iter().enumerate() {
        let to = transformed[(i + 1) % transformed.len()];
        screen.draw_line(from, to, color);
    }
}

fn plot_line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
    let (sx, sy) = (if x0 < x1 { 1 } else { -1 }, if y0 < y1 { 1 } else { -1 });
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    loop {
        plot(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = err * 2;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn rows(&self) -> Vec<String> {
        self.buffer.iter().map(|row| row.iter().collect()).collect()
    }

    pub fn print_to_log(&self, frame: u64) {
        info!("--- Screen Buffer (frame {}) ---", frame);
        for row in self.rows() {
            info!("{}", row);
        }
        info!("---------------------");
    }
}

// --- OutputTarget: the real terminal or a headless ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Styling has no meaning headless
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: a character-cell rasterizer over the terminal ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

const BLANK: Cell = Cell { glyph: ' ', color: Color::Black };

/// Maps a logical `width` x `height` screen onto `cols` x `rows` cells.
pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub cols: u16,
    pub rows: u16,
    width: u32,
    height: u32,
}

impl GameGrid {
    pub fn new(width: u32, height: u32, cols: u16, rows: u16) -> Self {
        GameGrid {
            grid: vec![vec![BLANK; cols as usize]; rows as usize],
            cols,
            rows,
            width,
            height,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = GameGrid::new(self.width, self.height, cols, rows);
    }

    fn to_cell(&self, position: Vector2D) -> (i32, i32) {
        let col = position.x / f64::from(self.width) * f64::from(self.cols);
        let row = position.y / f64::from(self.height) * f64::from(self.rows);
        (col.floor() as i32, row.floor() as i32)
    }

    pub fn set_cell(&mut self, col: i32, row: i32, glyph: char, color: Color) {
        if (0..i32::from(self.cols)).contains(&col) && (0..i32::from(self.rows)).contains(&row) {
            self.grid[row as usize][col as usize] = Cell { glyph, color };
        }
    }

    #[cfg(test)]
    pub fn row_text(&self, row: usize) -> String {
        self.grid[row].iter().map(|cell| cell.glyph).collect()
    }

    /// Writes the whole grid, switching foreground colour only between runs.
    pub fn render(&self, out: &mut OutputTarget) -> io::Result<()> {
        for (y, row) in self.grid.iter().enumerate() {
            out.execute_move_to(MoveTo(0, y as u16))?;
            let mut start = 0;
            while start < row.len() {
                let color = row[start].color;
                let end = row[start..]
                    .iter()
                    .position(|cell| cell.color != color)
                    .map_or(row.len(), |offset| start + offset);
                let run: String = row[start..end].iter().map(|cell| cell.glyph).collect();
                out.execute_other_command(SetForegroundColor(color.into()))?;
                write!(out, "{}", run)?;
                start = end;
            }
        }
        out.execute_other_command(ResetColor)?;
        out.flush()
    }
}

impl Rasterizer for GameGrid {
    fn screen_width(&self) -> u32 {
        self.width
    }

    fn screen_height(&self) -> u32 {
        self.height
    }

    fn clear_screen(&mut self, color: Color) {
        for row in &mut self.grid {
            row.fill(Cell { glyph: ' ', color });
        }
    }

    fn draw_point(&mut self, position: Vector2D, color: Color) {
        let (col, row) = self.to_cell(position);
        self.set_cell(col, row, POINT_CHAR, color);
    }

    fn draw_line(&mut self, from: Vector2D, to: Vector2D, color: Color) {
        let (x0, y0) = self.to_cell(from);
        let (x1, y1) = self.to_cell(to);
        plot_line(x0, y0, x1, y1, |col, row| self.set_cell(col, row, LINE_CHAR, color));
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let (col, row) = self.to_cell(Vector2D::new(f64::from(x), f64::from(y)));
        for (offset, glyph) in text.chars().enumerate() {
            self.set_cell(col + offset as i32, row, glyph, color);
        }
    }
}
