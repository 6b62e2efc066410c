use crate::config::SPAWN_ATTEMPTS;
use crate::food::{self, Food};
use crate::grid::Grid;
use crate::obstacles::ObstacleField;
use crate::snake::Snake;
use crate::types::{BoundaryPolicy, Cell, FoodBias, FoodKind, ObstacleMode};
use rand::Rng;
use std::collections::HashSet;

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Boundary,
    Hazard,
    Agent,
}

impl Collision {
    pub fn describe(self, name: &str) -> String {
        match self {
            Collision::Boundary => format!("{} slammed the synthwall.", name),
            Collision::Hazard => format!("{} crashed into a hazard.", name),
            Collision::Agent => format!("{} tangled with another serpent.", name),
        }
    }
}

/// Classification of a snake's next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Clear(Cell),
    Blocked(Collision),
}

// Represents the board: grid, hazards, snakes and food
#[derive(Debug, Clone)]
pub struct Arena {
    pub grid: Grid,
    pub policy: BoundaryPolicy,
    pub obstacle_mode: ObstacleMode,
    pub obstacles: ObstacleField,
    pub snakes: Vec<Snake>,
    pub foods: Vec<Food>,
}

impl Arena {
    pub fn new(grid: Grid) -> Self {
        Arena {
            grid,
            policy: BoundaryPolicy::Wrap,
            obstacle_mode: ObstacleMode::None,
            obstacles: ObstacleField::default(),
            snakes: Vec::new(),
            foods: Vec::new(),
        }
    }

    /// Rebuilds the obstacle field from scratch for `mode`.
    pub fn set_obstacles(&mut self, mode: ObstacleMode) {
        self.obstacle_mode = mode;
        self.obstacles = ObstacleField::build(mode, self.grid);
        log::debug!(
            target: "obstacle",
            "Obstacle field rebuilt as {:?} with {} active cells",
            mode,
            self.obstacles.active_cells().len()
        );
        self.clear_blocked_food();
    }

    // Food under a live hazard could never be eaten
    fn clear_blocked_food(&mut self) {
        let before = self.foods.len();
        let obstacles = &self.obstacles;
        self.foods.retain(|food| !obstacles.blocks(food.cell));
        if self.foods.len() < before {
            log::debug!(target: "food", "Dropped {} food items now under hazards", before - self.foods.len());
        }
    }

    /// Cells taken by snakes, active obstacles and food, built fresh on every call.
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.occupied_except(None)
    }

    fn occupied_except(&self, skip: Option<usize>) -> HashSet<Cell> {
        let mut occupied: HashSet<Cell> = self
            .snakes
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .flat_map(|(_, snake)| snake.segments.iter().copied())
            .collect();
        occupied.extend(self.obstacles.active_cells().iter().copied());
        occupied.extend(self.foods.iter().map(|food| food.cell));
        occupied
    }

    pub fn is_snake_at(&self, cell: Cell) -> bool {
        self.snakes.iter().any(|snake| snake.occupies(cell))
    }

    pub fn food_index_at(&self, cell: Cell) -> Option<usize> {
        self.foods.iter().position(|food| food.cell == cell)
    }

    /// Uniform random free cell; after the probe budget runs out, the first free
    /// cell scanning from the center. `None` only when the board is full.
    pub fn free_cell<R: Rng>(&self, rng: &mut R) -> Option<Cell> {
        self.first_free(&self.occupied_cells(), rng)
    }

    /// Free cell for respawning snake `index`. Its own body counts as vacated, so a
    /// snake that still sits on the board always finds a cell.
    pub fn respawn_cell<R: Rng>(&self, index: usize, rng: &mut R) -> Option<Cell> {
        self.first_free(&self.occupied_except(Some(index)), rng)
    }

    fn first_free<R: Rng>(&self, occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell> {
        for _ in 0..SPAWN_ATTEMPTS {
            let cell = Cell::new(rng.gen_range(0..self.grid.cols), rng.gen_range(0..self.grid.rows));
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
        self.grid.cells_from_center().find(|cell| !occupied.contains(cell))
    }

    /// Places one food item. Returns `None` when no free cell exists.
    pub fn spawn_food<R: Rng>(
        &mut self,
        requested: Option<FoodKind>,
        bias: FoodBias,
        rng: &mut R,
    ) -> Option<Food> {
        let kind = food::choose_kind(requested, bias, rng);
        let cell = self.free_cell(rng)?;
        let item = Food::new(cell, kind);
        self.foods.push(item);
        log::debug!(target: "food", "Spawned {:?} food at {}", kind, cell);
        Some(item)
    }

    /// Brings the food pool to its target count: newest items go first when the
    /// roster shrank, fresh ones are spawned when it is short.
    pub fn replenish_food<R: Rng>(&mut self, bias: FoodBias, rng: &mut R) {
        let target = food::target_count(self.snakes.len());
        if self.foods.len() > target {
            log::debug!(target: "food", "Trimming food pool from {} to {}", self.foods.len(), target);
            self.foods.truncate(target);
        }
        while self.foods.len() < target {
            if self.spawn_food(None, bias, rng).is_none() {
                log::warn!("No free cell left for food");
                break;
            }
        }
    }

    /// Classifies the move of snake `index` along its pending direction.
    pub fn classify_move(&self, index: usize) -> MoveOutcome {
        let snake = &self.snakes[index];
        let Some(next) = self.grid.project(snake.head(), snake.pending_direction, self.policy) else {
            return MoveOutcome::Blocked(Collision::Boundary);
        };
        if self.obstacles.blocks(next) {
            return MoveOutcome::Blocked(Collision::Hazard);
        }

        // The mover's tail leaves this step unless the move lands on food
        let vacating = (snake.len() > 1 && self.food_index_at(next).is_none()).then(|| snake.tail());
        let hits_agent = self.snakes.iter().enumerate().any(|(i, other)| {
            if i == index {
                other.segments.iter().any(|&seg| seg == next && Some(seg) != vacating)
            } else {
                other.occupies(next)
            }
        });
        if hits_agent {
            return MoveOutcome::Blocked(Collision::Agent);
        }
        MoveOutcome::Clear(next)
    }

    /// Drops food and respawns snakes that no longer fit after a resize.
    pub fn resize<R: Rng>(&mut self, grid: Grid, rng: &mut R) {
        self.grid = grid;
        self.obstacles = ObstacleField::build(self.obstacle_mode, grid);
        self.foods.retain(|food| grid.contains(food.cell));
        self.clear_blocked_food();

        let mut stranded = Vec::new();
        for i in 0..self.snakes.len() {
            if self.snakes[i].segments.iter().all(|seg| grid.contains(*seg)) {
                continue;
            }
            match self.respawn_cell(i, rng) {
                Some(cell) => self.snakes[i].respawn(cell),
                None => stranded.push(i),
            }
        }
        // Only a board packed by the other snakes leaves no room
        for i in stranded.into_iter().rev() {
            let snake = self.snakes.remove(i);
            log::warn!("No room left for {} after resize", snake.name);
        }
    }
}
