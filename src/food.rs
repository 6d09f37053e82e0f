use rand::Rng;

use crate::grid::{Cell, Geometry};

/// Where the first piece of food of every game appears.
pub const INITIAL_FOOD: Cell = Cell::new(10, 10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Default for Food {
    fn default() -> Self {
        Self::new()
    }
}

impl Food {
    pub fn new() -> Self {
        Food {
            position: INITIAL_FOOD,
        }
    }

    pub fn at(position: Cell) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the food to a random interior cell. The cell may be under the snake.
    pub fn relocate(&mut self, geometry: &Geometry, rng: &mut impl Rng) {
        self.position = geometry.random_interior(rng);
    }
}
