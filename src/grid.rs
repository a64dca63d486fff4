use crate::snake::Heading;

/// A (column, row) position on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: u16,
    pub row: u16,
}

impl Cell {
    pub const fn new(col: u16, row: u16) -> Self {
        Cell { col, row }
    }
}

/// Screen area covered by a cell, in terminal character units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Board dimensions plus the size of a single cell on screen. The board is a
/// torus: leaving one edge re-enters from the opposite one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cell_width: u16,
    cell_height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16, cell_width: u16, cell_height: u16) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        assert!(cell_width > 0 && cell_height > 0, "cells must cover at least one character");
        Grid { width, height, cell_width, cell_height }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    /// Total screen size needed to show the whole board.
    pub fn screen_size(&self) -> (u16, u16) {
        (self.width * self.cell_width, self.height * self.cell_height)
    }

    /// Neighbour of `cell` one step towards `heading`, wrapped on both axes.
    pub fn advance(&self, cell: Cell, heading: Heading) -> Cell {
        let (dx, dy) = heading.delta();
        let col = (cell.col as i32 + dx).rem_euclid(self.width as i32);
        let row = (cell.row as i32 + dy).rem_euclid(self.height as i32);
        Cell::new(col as u16, row as u16)
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect {
            x: cell.col * self.cell_width,
            y: cell.row * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Every cell of the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(col, row)))
    }
}
