//! Read-only exports handed to the renderer and HUD after each committed step.

use crate::arena::Arena;
use crate::food::Food;
use crate::types::{BoundaryPolicy, Cell, Rgb};

#[derive(Debug, Clone, PartialEq)]
pub struct SnakeView {
    pub id: u32,
    pub name: String,
    pub segments: Vec<Cell>,
    pub color: Rgb,
    pub ai: bool,
}

/// Everything needed to draw one frame of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub cols: i32,
    pub rows: i32,
    pub snakes: Vec<SnakeView>,
    pub obstacles: Vec<Cell>,
    pub foods: Vec<Food>,
    pub hard_mode: bool,
}

impl Scene {
    pub fn capture(arena: &Arena) -> Self {
        let mut obstacles: Vec<Cell> = arena.obstacles.active_cells().iter().copied().collect();
        obstacles.sort_by_key(|cell| (cell.y, cell.x));
        Scene {
            cols: arena.grid.cols,
            rows: arena.grid.rows,
            snakes: arena
                .snakes
                .iter()
                .map(|snake| SnakeView {
                    id: snake.id,
                    name: snake.name.clone(),
                    segments: snake.segments.iter().copied().collect(),
                    color: snake.color,
                    ai: snake.ai,
                })
                .collect(),
            obstacles,
            foods: arena.foods.clone(),
            hard_mode: arena.policy == BoundaryPolicy::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedLabel {
    Cruise,
    Turbo,
    Hold,
}

impl SpeedLabel {
    pub fn from_flags(turbo: bool, hold: bool) -> Self {
        match (turbo, hold) {
            (true, false) => SpeedLabel::Turbo,
            (true, true) => SpeedLabel::Hold,
            (false, _) => SpeedLabel::Cruise,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedLabel::Cruise => "Cruise",
            SpeedLabel::Turbo => "Turbo",
            SpeedLabel::Hold => "Hold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryLabel {
    Wrap,
    Solid,
}

impl BoundaryLabel {
    pub fn label(self) -> &'static str {
        match self {
            BoundaryLabel::Wrap => "Wrap",
            BoundaryLabel::Solid => "Solid",
        }
    }
}

impl From<BoundaryPolicy> for BoundaryLabel {
    fn from(policy: BoundaryPolicy) -> Self {
        match policy {
            BoundaryPolicy::Wrap => BoundaryLabel::Wrap,
            BoundaryPolicy::Hard => BoundaryLabel::Solid,
        }
    }
}

/// Summary counters for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub score: u32,
    pub players: usize,
    pub ai_snakes: usize,
    pub speed: SpeedLabel,
    pub boundary: BoundaryLabel,
}
