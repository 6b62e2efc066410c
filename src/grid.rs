use crate::config::{CELL_SIZE, MIN_DISPLAY_HEIGHT, MIN_DISPLAY_WIDTH, MIN_GRID_CELLS};
use crate::types::{BoundaryPolicy, Cell, Direction};

/// Column/row space of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(cols: i32, rows: i32) -> Self {
        Grid { cols, rows }
    }

    /// Converts a display area in pixels into a cell count.
    pub fn from_display(width: u32, height: u32) -> Self {
        let width = width.max(MIN_DISPLAY_WIDTH);
        let height = height.max(MIN_DISPLAY_HEIGHT);
        Grid {
            cols: (width / CELL_SIZE).max(MIN_GRID_CELLS) as i32,
            rows: (height / CELL_SIZE).max(MIN_GRID_CELLS) as i32,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols && cell.y < self.rows
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.cols / 2, self.rows / 2)
    }

    pub fn area(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Candidate next cell from `head` moving in `direction`.
    /// Returns `None` when a hard boundary is crossed.
    pub fn project(&self, head: Cell, direction: Direction, policy: BoundaryPolicy) -> Option<Cell> {
        let (dx, dy) = direction.offset();
        let next = Cell::new(head.x + dx, head.y + dy);
        match policy {
            BoundaryPolicy::Hard => self.contains(next).then_some(next),
            BoundaryPolicy::Wrap => Some(Cell::new(
                next.x.rem_euclid(self.cols),
                next.y.rem_euclid(self.rows),
            )),
        }
    }

    /// Every cell in row-major order starting at the center, wrapping around.
    pub fn cells_from_center(&self) -> impl Iterator<Item = Cell> + '_ {
        let center = self.center();
        let start = (center.y * self.cols + center.x) as usize;
        let area = self.area();
        (0..area).map(move |i| {
            let index = ((start + i) % area) as i32;
            Cell::new(index % self.cols, index / self.cols)
        })
    }
}
