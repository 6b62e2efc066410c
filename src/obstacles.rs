//! Hazard cell layouts.

use crate::config::{
    GRID_OBSTACLE_MARGIN_X, GRID_OBSTACLE_MARGIN_Y, GRID_OBSTACLE_STEP_X, GRID_OBSTACLE_STEP_Y,
    PULSE_INTERVAL, PULSE_OFFSET, PULSE_REACH,
};
use crate::grid::Grid;
use crate::types::{Cell, ObstacleMode};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseSet {
    A,
    B,
}

/// Two alternating cell sets. Only the active one blocks.
#[derive(Debug, Clone)]
pub struct PulsePattern {
    pub horizontal: HashSet<Cell>, // set A
    pub vertical: HashSet<Cell>,   // set B
    pub active: PulseSet,
    pub timer: u32,
    pub interval: u32,
}

impl PulsePattern {
    pub fn new(grid: Grid) -> Self {
        let center = grid.center();
        let mut horizontal = HashSet::new();
        let mut vertical = HashSet::new();

        let reach_left = PULSE_REACH.min(center.x - PULSE_OFFSET);
        let reach_right = PULSE_REACH.min(grid.cols - center.x - PULSE_OFFSET - 1);
        for offset in -reach_left..=reach_right {
            horizontal.insert(Cell::new(center.x + offset, center.y - PULSE_OFFSET));
            horizontal.insert(Cell::new(center.x + offset, center.y + PULSE_OFFSET));
        }

        let reach_up = PULSE_REACH.min(center.y - PULSE_OFFSET);
        let reach_down = PULSE_REACH.min(grid.rows - center.y - PULSE_OFFSET - 1);
        for offset in -reach_up..=reach_down {
            vertical.insert(Cell::new(center.x - PULSE_OFFSET, center.y + offset));
            vertical.insert(Cell::new(center.x + PULSE_OFFSET, center.y + offset));
        }

        PulsePattern {
            horizontal,
            vertical,
            active: PulseSet::A,
            timer: 0,
            interval: PULSE_INTERVAL,
        }
    }

    pub fn active_cells(&self) -> &HashSet<Cell> {
        match self.active {
            PulseSet::A => &self.horizontal,
            PulseSet::B => &self.vertical,
        }
    }

    /// Counts one step; returns true when the active set flipped.
    pub fn advance(&mut self) -> bool {
        self.timer += 1;
        if self.timer >= self.interval {
            self.timer = 0;
            self.active = match self.active {
                PulseSet::A => PulseSet::B,
                PulseSet::B => PulseSet::A,
            };
            return true;
        }
        false
    }
}

/// The blocked cells for the selected obstacle mode.
#[derive(Debug, Clone)]
pub enum ObstacleField {
    Static(HashSet<Cell>),
    Pulse(PulsePattern),
}

impl Default for ObstacleField {
    fn default() -> Self {
        ObstacleField::Static(HashSet::new())
    }
}

impl ObstacleField {
    /// Builds a field from scratch for `mode` on `grid`.
    pub fn build(mode: ObstacleMode, grid: Grid) -> Self {
        match mode {
            ObstacleMode::None => ObstacleField::Static(HashSet::new()),
            ObstacleMode::Corner => ObstacleField::Static(corner_cells(grid)),
            ObstacleMode::Grid => ObstacleField::Static(lattice_cells(grid)),
            ObstacleMode::Pulse => ObstacleField::Pulse(PulsePattern::new(grid)),
        }
    }

    pub fn active_cells(&self) -> &HashSet<Cell> {
        match self {
            ObstacleField::Static(cells) => cells,
            ObstacleField::Pulse(pattern) => pattern.active_cells(),
        }
    }

    pub fn blocks(&self, cell: Cell) -> bool {
        self.active_cells().contains(&cell)
    }

    /// Advances the pulse counter. Static fields never change.
    pub fn advance(&mut self) -> bool {
        match self {
            ObstacleField::Static(_) => false,
            ObstacleField::Pulse(pattern) => pattern.advance(),
        }
    }
}

fn corner_cells(grid: Grid) -> HashSet<Cell> {
    let mut cells = HashSet::new();
    for offset in 1..=3 {
        cells.insert(Cell::new(offset, offset));
        cells.insert(Cell::new(grid.cols - 1 - offset, offset));
        cells.insert(Cell::new(offset, grid.rows - 1 - offset));
        cells.insert(Cell::new(grid.cols - 1 - offset, grid.rows - 1 - offset));
    }
    cells
}

fn lattice_cells(grid: Grid) -> HashSet<Cell> {
    let mut cells = HashSet::new();
    for x in (GRID_OBSTACLE_MARGIN_X..grid.cols - GRID_OBSTACLE_MARGIN_X).step_by(GRID_OBSTACLE_STEP_X) {
        for y in (GRID_OBSTACLE_MARGIN_Y..grid.rows - GRID_OBSTACLE_MARGIN_Y).step_by(GRID_OBSTACLE_STEP_Y) {
            cells.insert(Cell::new(x, y));
        }
    }
    cells
}
