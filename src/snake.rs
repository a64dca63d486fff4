use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use Heading::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right
}

impl Heading {
    /// Column/row offset applied per tick.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

pub struct Snake {
    initial: Cell,
    body: VecDeque<Cell>,
    heading: Heading,
    pending: Option<Heading>,
    length: usize,
    last_removed: Option<Cell>,
}

impl Snake {
    pub fn new(initial: Cell) -> Self {
        let mut snake = Snake {
            initial,
            body: VecDeque::new(),
            heading: Right,
            pending: None,
            length: 1,
            last_removed: None,
        };
        snake.reset();
        snake
    }

    /// Head first.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn pending_heading(&self) -> Option<Heading> {
        self.pending
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Cell the tail left behind on the last step, if it moved off one.
    pub fn last_removed(&self) -> Option<Cell> {
        self.last_removed
    }

    /// Buffers a turn for the next step. Reversals are checked against the
    /// heading in use, not against an already buffered turn, so a quick
    /// Up-then-Left while heading Right keeps only the turns legal from Right.
    pub fn set_pending_heading(&mut self, heading: Heading) {
        if heading != self.heading.opposite() {
            self.pending = Some(heading);
        }
    }

    pub fn step(&mut self, grid: &Grid) {
        if let Some(heading) = self.pending.take() {
            self.heading = heading;
        }

        let new_head = grid.advance(self.head(), self.heading);
        debug_assert!(grid.contains(new_head));
        self.body.push_front(new_head);

        self.last_removed = if self.body.len() > self.length {
            self.body.pop_back()
        } else {
            None
        };
    }

    /// Takes effect on the next step, which keeps its tail.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn has_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(2).any(|&cell| cell == head)
    }

    pub fn reset(&mut self) {
        self.length = 1;
        self.body.clear();
        self.body.push_back(self.initial);
        self.heading = Right;
        self.pending = None;
        self.last_removed = None;
    }
}
