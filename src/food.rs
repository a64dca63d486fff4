use rand::{seq::IteratorRandom, Rng};

use crate::grid::{Cell, Grid};

pub struct Food {
    position: Cell,
}

impl Food {
    pub fn at(position: Cell) -> Self {
        Food { position }
    }

    /// Places the food on a random cell outside `forbidden`. Falls back to the
    /// board center if there is no room at all.
    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, forbidden: &[Cell], rng: &mut R) -> Self {
        let mut food = Food::at(grid.center());
        food.relocate(grid, forbidden, rng);
        food
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves to a uniformly chosen free cell. Returns false, leaving the food
    /// where it is, when every cell is forbidden.
    pub fn relocate<'a, R, I>(&mut self, grid: &Grid, forbidden: I, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell>,
    {
        let taken: Vec<Cell> = forbidden.into_iter().copied().collect();
        let choice = grid.cells().filter(|cell| !taken.contains(cell)).choose(rng);

        match choice {
            Some(cell) => {
                self.position = cell;
                true
            }
            None => false,
        }
    }
}
