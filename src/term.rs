use std::io::{stdout, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::snake::Snake;

const WINDOW_TITLE: &str = "Snake";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb { r: c.0, g: c.1, b: c.2 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub border: Rgb,
    pub food: Rgb,
    pub snake: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Rgb(0, 0, 0),
            border: Rgb(93, 216, 228),
            food: Rgb(255, 0, 0),
            snake: Rgb(0, 255, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    /// A bordered square.
    Tile { cell: Cell, fill: Rgb, border: Rgb },
    /// Paint the cell with the background color.
    Erase { cell: Cell },
}

/// Everything to draw for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Wipe the board before drawing.
    pub clear: bool,
    pub commands: Vec<DrawCommand>,
}

pub trait Drawable {
    fn draw(&self, palette: &Palette, frame: &mut Frame);
}

impl Drawable for Snake {
    fn draw(&self, palette: &Palette, frame: &mut Frame) {
        if let Some(cell) = self.last_removed() {
            frame.commands.push(DrawCommand::Erase { cell });
        }
        for &cell in self.body() {
            frame.commands.push(DrawCommand::Tile { cell, fill: palette.snake, border: palette.border });
        }
    }
}

impl Drawable for Food {
    fn draw(&self, palette: &Palette, frame: &mut Frame) {
        frame.commands.push(DrawCommand::Tile {
            cell: self.position(),
            fill: palette.food,
            border: palette.border,
        });
    }
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

pub struct TermManager<W: Write = Stdout> {
    out: W,
    grid: Grid,
    palette: Palette,
}

impl TermManager<Stdout> {
    pub fn new(grid: Grid, palette: Palette) -> Self {
        TermManager::with_writer(stdout(), grid, palette)
    }

    /// Fails if the terminal cannot hold the whole board.
    pub fn setup(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size().context("Error reading terminal size")?;
        let (need_cols, need_rows) = self.grid.screen_size();
        if cols < need_cols || rows < need_rows {
            anyhow::bail!(
                "terminal is {}x{} but the board needs {}x{}; shrink the grid or enlarge the terminal",
                cols, rows, need_cols, need_rows
            );
        }

        execute!(self.out, EnterAlternateScreen, terminal::SetTitle(WINDOW_TITLE))
            .context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error setting raw mode")?;
        execute!(self.out, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(out: W, grid: Grid, palette: Palette) -> Self {
        TermManager { out, grid, palette }
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.out, SetBackgroundColor(self.palette.background.into()), terminal::Clear(ClearType::All))?;
        let grid = self.grid;
        for cell in grid.cells() {
            self.paint(cell, self.palette.background, None)?;
        }
        Ok(())
    }

    fn paint(&mut self, cell: Cell, fill: Rgb, border: Option<Rgb>) -> Result<()> {
        let rect = self.grid.cell_rect(cell);
        let row = tile_row(rect.width, border.is_some());

        queue!(self.out, SetBackgroundColor(fill.into()))?;
        if let Some(border) = border {
            queue!(self.out, SetForegroundColor(border.into()))?;
        }
        for dy in 0..rect.height {
            queue!(self.out, cursor::MoveTo(rect.x, rect.y + dy), Print(&row))?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TermManager<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        if frame.clear {
            self.clear()?;
        }

        for command in &frame.commands {
            match *command {
                DrawCommand::Tile { cell, fill, border } => self.paint(cell, fill, Some(border))?,
                DrawCommand::Erase { cell } => self.paint(cell, self.palette.background, None)?,
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush().context("Error flushing")?;
        Ok(())
    }
}

// Terminal cells can't carry a pixel outline, so the border is drawn as
// bracket glyphs at both ends of the tile.
fn tile_row(width: u16, bordered: bool) -> String {
    match (bordered, width) {
        (false, w) => " ".repeat(w as usize),
        (true, 1) => "■".to_string(),
        (true, w) => format!("[{}]", " ".repeat(w as usize - 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(frame: &Frame) -> String {
        let grid = Grid::new(4, 3, 2, 1);
        let mut term = TermManager::with_writer(Vec::new(), grid, Palette::default());
        term.render(frame).unwrap();
        String::from_utf8(term.out).unwrap()
    }

    #[test]
    fn palette_colors_are_distinct() {
        let p = Palette::default();
        let colors = [p.background, p.border, p.food, p.snake];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn snake_draws_body_and_erases_old_tail() {
        let grid = Grid::new(8, 8, 1, 1);
        let palette = Palette::default();
        let mut snake = Snake::new(Cell::new(2, 2));
        snake.grow();
        snake.step(&grid);
        snake.step(&grid);

        let mut frame = Frame::default();
        snake.draw(&palette, &mut frame);
        assert_eq!(
            frame.commands,
            vec![
                DrawCommand::Erase { cell: Cell::new(2, 2) },
                DrawCommand::Tile { cell: Cell::new(4, 2), fill: palette.snake, border: palette.border },
                DrawCommand::Tile { cell: Cell::new(3, 2), fill: palette.snake, border: palette.border },
            ]
        );
    }

    #[test]
    fn food_draws_one_tile() {
        let palette = Palette::default();
        let mut frame = Frame::default();
        Food::at(Cell::new(1, 2)).draw(&palette, &mut frame);
        assert_eq!(
            frame.commands,
            vec![DrawCommand::Tile { cell: Cell::new(1, 2), fill: palette.food, border: palette.border }]
        );
    }

    #[test]
    fn tile_rows_fill_the_cell_width() {
        assert_eq!(tile_row(3, false), "   ");
        assert_eq!(tile_row(1, true), "■");
        assert_eq!(tile_row(2, true), "[]");
        assert_eq!(tile_row(4, true), "[  ]");
    }

    #[test]
    fn render_writes_tiles_at_their_screen_position() {
        let frame = Frame {
            clear: false,
            commands: vec![DrawCommand::Tile { cell: Cell::new(1, 2), fill: Rgb(0, 255, 0), border: Rgb(1, 2, 3) }],
        };
        let out = render_to_string(&frame);
        // MoveTo is 0-based in the API but 1-based on the wire: column 2 -> 3, row 2 -> 3.
        assert!(out.contains("\x1b[3;3H[]"), "{:?}", out);
        assert!(out.contains("48;2;0;255;0"), "{:?}", out);
    }

    #[test]
    fn clear_paints_every_cell() {
        let out = render_to_string(&Frame { clear: true, commands: vec![] });
        assert_eq!(out.matches("H  ").count(), 12);
        assert!(out.contains("\x1b[1;1H  "));
        assert!(out.contains("\x1b[3;7H  "));
    }
}
