use std::collections::VecDeque;

use log::debug;

use crate::grid::{Cell, Direction};

/// Body of a fresh snake, head first.
pub const STARTING_BODY: [Cell; 3] = [Cell::new(7, 5), Cell::new(6, 5), Cell::new(5, 5)];
pub const STARTING_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    /// Head at the front, tail at the back.
    segments: VecDeque<Cell>,
    direction: Direction,
    next_direction: Direction,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            segments: VecDeque::from(STARTING_BODY),
            direction: STARTING_DIRECTION,
            next_direction: STARTING_DIRECTION,
        }
    }

    /// Builds a snake from arbitrary segments, head first.
    #[cfg(test)]
    pub(crate) fn from_segments(segments: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let segments: VecDeque<Cell> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "a snake needs at least a head");
        Snake {
            segments,
            direction,
            next_direction: direction,
        }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Queues a turn for the next tick. Reversing the current heading is
    /// ignored, even if a different turn is already queued.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction == self.direction.opposite() {
            debug!("Ignoring reversal from {:?} to {:?}", self.direction, new_direction);
            return;
        }
        self.next_direction = new_direction;
    }

    /// Applies the queued turn and returns the cell the head would move to.
    pub(crate) fn commit_direction(&mut self) -> Cell {
        self.direction = self.next_direction;
        self.head().shifted(self.direction)
    }

    /// True if `cell` is any current segment, tail included.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.segments.push_front(cell);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        self.segments.pop_back()
    }
}
