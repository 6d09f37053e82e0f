use rand::Rng;

/// A single position on the playing field, counted in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn shifted(self, direction: Direction) -> Cell {
        let (dc, dr) = direction.delta();
        Cell {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    /// Column and row offset of one step. Rows grow downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Size of the playing field in cells, including the border ring.
///
/// Only [`crate::config::Config::geometry`] builds one outside of tests, so a
/// `Geometry` always has room for an interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    width: i32,
    height: i32,
}

impl Geometry {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        debug_assert!(width >= 3 && height >= 3, "grid has no interior");
        Geometry { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True for cells on the outermost ring (or anywhere outside the grid).
    pub fn is_border(&self, cell: Cell) -> bool {
        cell.col <= 0 || cell.row <= 0 || cell.col >= self.width - 1 || cell.row >= self.height - 1
    }

    pub fn is_interior(&self, cell: Cell) -> bool {
        !self.is_border(cell)
    }

    /// Uniformly random cell with column in `1..=width-2` and row in `1..=height-2`.
    pub fn random_interior(&self, rng: &mut impl Rng) -> Cell {
        Cell {
            col: rng.gen_range(1..self.width - 1),
            row: rng.gen_range(1..self.height - 1),
        }
    }

    /// Every cell of the border ring, row by row. Inner rows only yield
    /// their two edge cells.
    pub fn border_cells(&self) -> impl Iterator<Item = Cell> {
        let Geometry { width, height } = *self;
        (0..height).flat_map(move |row| {
            let step = if row == 0 || row == height - 1 {
                1
            } else {
                (width - 1) as usize
            };
            (0..width)
                .step_by(step)
                .map(move |col| Cell::new(col, row))
        })
    }
}
