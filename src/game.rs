use crate::ai;
use crate::arena::{Arena, Collision, MoveOutcome};
use crate::config::{
    CLONE_OVERFLOW_BONUS, COLLISION_PENALTY, FOOD_SCORE, MAX_SNAKES, MIN_SNAKES, STEP_INTERVAL_MS,
    TURBO_MULTIPLIER,
};
use crate::error::GameError;
use crate::grid::Grid;
use crate::scene::{Metrics, Scene, SpeedLabel};
use crate::snake::Snake;
use crate::types::{
    BoundaryPolicy, CHROMA_PALETTE, Cell, Command, Direction, FoodBias, FoodKind, ObstacleMode,
};
use crate::{debug_food, debug_snake, debug_tick};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BOOT_STATUS: &str = "Retro grid booted. Ready to roll.";

/// The Game struct owns the whole simulation: board, score, flags and the step clock.
pub struct Game {
    pub arena: Arena,
    pub score: u32,
    pub running: bool,
    pub turbo: bool,
    pub turbo_hold: bool,
    pub food_bias: FoodBias,
    pub steps: u64,
    display: (u32, u32),
    last_tick_ms: Option<f64>,
    status: String,
    next_id: u32,
    rng: StdRng,
}

impl Game {
    /// Create a game for a display area of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, GameError> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Same as `new` with reproducible random placement.
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, rng: StdRng) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::MissingSurface { width, height });
        }
        let grid = Grid::from_display(width, height);
        let mut game = Game {
            arena: Arena::new(grid),
            score: 0,
            running: false,
            turbo: false,
            turbo_hold: false,
            food_bias: FoodBias::Random,
            steps: 0,
            display: (width, height),
            last_tick_ms: None,
            status: String::new(),
            next_id: 1,
            rng,
        };
        game.reset();
        info!("Grid created with {}x{} cells.", grid.cols, grid.rows);
        Ok(game)
    }

    // --- Lifecycle ---

    /// Back to one human snake, no score, default flags. Leaves the clock stopped.
    pub fn reset(&mut self) {
        self.stop();
        let grid = Grid::from_display(self.display.0, self.display.1);
        self.arena = Arena::new(grid);
        self.arena.set_obstacles(ObstacleMode::None);
        self.score = 0;
        self.steps = 0;
        self.turbo = false;
        self.turbo_hold = false;
        self.food_bias = FoodBias::Random;
        self.next_id = 1;

        // The board is empty here, so the center fallback is never taken
        let head = self.arena.free_cell(&mut self.rng).unwrap_or_else(|| self.arena.grid.center());
        let player = self.create_snake(false, "Player One".to_string(), head);
        self.arena.snakes.push(player);
        self.arena.replenish_food(self.food_bias, &mut self.rng);
        self.set_status(BOOT_STATUS);
    }

    /// Resets and begins committing steps on the following ticks.
    pub fn start(&mut self) {
        self.reset();
        self.running = true;
        info!("Simulation started.");
    }

    /// Stops committing steps. State is kept.
    pub fn stop(&mut self) {
        if self.running {
            info!("Simulation stopped after {} steps.", self.steps);
        }
        self.running = false;
        self.last_tick_ms = None;
    }

    /// Recomputes the grid for a new display area.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            warn!("Ignoring resize to an empty surface ({}x{})", width, height);
            return;
        }
        self.display = (width, height);
        let grid = Grid::from_display(width, height);
        if grid != self.arena.grid {
            info!("Grid resized to {}x{} cells.", grid.cols, grid.rows);
            self.arena.resize(grid, &mut self.rng);
            self.arena.replenish_food(self.food_bias, &mut self.rng);
        }
    }

    // --- Commands ---

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Steer { player, direction } => {
                self.steer(player, direction);
            }
            Command::ToggleTurboHold => self.toggle_turbo_hold(),
            Command::SetTurbo(on) => self.set_turbo(on),
            Command::SetHardMode(on) => self.set_hard_mode(on),
            Command::SetFoodBias(bias) => self.set_food_bias(bias),
            Command::SetObstacles(mode) => self.set_obstacles(mode),
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::AddSnake => {
                if let Err(e) = self.add_snake(true) {
                    warn!("{}", e);
                }
            }
            Command::RemoveSnake => {
                if let Err(e) = self.remove_snake() {
                    warn!("{}", e);
                }
            }
        }
    }

    /// Queues a direction for `player`. Taking the wheel of a synth snake makes it human.
    pub fn steer(&mut self, player: usize, direction: Direction) -> bool {
        let Some(snake) = self.arena.snakes.get_mut(player) else {
            return false;
        };
        if direction.is_reverse_of(snake.direction) {
            return false;
        }
        let took_over = snake.ai;
        snake.ai = false;
        snake.steer(direction);
        if took_over {
            self.set_status(format!("Player {} grabbed manual control.", player + 1));
        }
        true
    }

    pub fn toggle_turbo_hold(&mut self) {
        if !self.turbo {
            return;
        }
        self.turbo_hold = !self.turbo_hold;
        self.set_status(if self.turbo_hold {
            "Turbo held. Drift through the beat."
        } else {
            "Turbo resumed. Full synth ahead."
        });
    }

    pub fn set_turbo(&mut self, on: bool) {
        self.turbo = on;
        self.turbo_hold = false;
        self.set_status(if on {
            "Turbo engaged. Neon trails ignite."
        } else {
            "Turbo disengaged. Smooth cruising."
        });
    }

    pub fn set_hard_mode(&mut self, on: bool) {
        self.arena.policy = if on { BoundaryPolicy::Hard } else { BoundaryPolicy::Wrap };
        self.set_status(if on {
            "Hard mode: walls are live."
        } else {
            "Wrap mode: glide forever."
        });
    }

    pub fn hard_mode(&self) -> bool {
        self.arena.policy == BoundaryPolicy::Hard
    }

    pub fn set_food_bias(&mut self, bias: FoodBias) {
        self.food_bias = bias;
        self.set_status(format!("Food synthesizer tuned to {}.", bias.label()));
    }

    pub fn set_obstacles(&mut self, mode: ObstacleMode) {
        self.arena.set_obstacles(mode);
        self.arena.replenish_food(self.food_bias, &mut self.rng);
        self.set_status(format!("Obstacle pattern set to {}.", mode.label()));
    }

    /// Adds a snake at a free cell. Rejected when the roster is full or no cell is free.
    pub fn add_snake(&mut self, ai: bool) -> Result<u32, GameError> {
        if self.arena.snakes.len() >= MAX_SNAKES {
            self.set_status("Snake limit reached. The grid is full.");
            return Err(GameError::RosterFull { max: MAX_SNAKES });
        }
        let Some(head) = self.arena.free_cell(&mut self.rng) else {
            self.set_status("No open cell left to beam in.");
            return Err(GameError::BoardFull);
        };
        let position = self.arena.snakes.len() + 1;
        let name = if ai {
            format!("Synth Snake {}", position)
        } else {
            format!("Player {}", position)
        };
        let snake = self.create_snake(ai, name, head);
        let id = snake.id;
        self.set_status(format!("{} beamed in.", snake.name));
        self.arena.snakes.push(snake);
        self.arena.replenish_food(self.food_bias, &mut self.rng);
        Ok(id)
    }

    /// Drops the most recently added snake. Rejected when only one is left.
    pub fn remove_snake(&mut self) -> Result<Snake, GameError> {
        if self.arena.snakes.len() <= MIN_SNAKES {
            self.set_status("Need at least one serpent to keep the show going.");
            return Err(GameError::RosterMinimum { min: MIN_SNAKES });
        }
        let Some(removed) = self.arena.snakes.pop() else {
            return Err(GameError::RosterMinimum { min: MIN_SNAKES });
        };
        self.set_status(format!("{} faded into the grid.", removed.name));
        self.arena.replenish_food(self.food_bias, &mut self.rng);
        Ok(removed)
    }

    // --- Scheduling ---

    /// Milliseconds between committed steps at the current turbo state.
    pub fn step_interval(&self) -> f64 {
        let multiplier = if self.turbo && !self.turbo_hold { TURBO_MULTIPLIER } else { 1.0 };
        STEP_INTERVAL_MS / multiplier
    }

    /// Host frame callback. Commits a step once enough time has passed since the last one.
    pub fn tick(&mut self, now_ms: f64) -> Option<Scene> {
        if !self.running {
            return None;
        }
        let last = *self.last_tick_ms.get_or_insert(now_ms);
        let elapsed = now_ms - last;
        if elapsed < self.step_interval() {
            return None;
        }
        self.last_tick_ms = Some(now_ms);
        Some(self.step(elapsed))
    }

    /// Commits one simulation step covering `elapsed_ms`.
    pub fn step(&mut self, elapsed_ms: f64) -> Scene {
        self.steps += 1;
        if self.arena.obstacles.advance() {
            debug_tick!(self.steps, "pulse obstacles flipped");
        }
        self.arena.replenish_food(self.food_bias, &mut self.rng);

        // Snakes cloned during this step wait for the next one
        let roster = self.arena.snakes.len();
        for index in 0..roster {
            let delta = elapsed_ms / self.arena.snakes[index].speed_bonus;
            self.advance_snake(index, delta);
        }

        debug_tick!(
            self.steps,
            "committed: elapsed {:.1}ms, score {}, {} snakes, {} food",
            elapsed_ms,
            self.score,
            self.arena.snakes.len(),
            self.arena.foods.len()
        );
        self.scene()
    }

    fn advance_snake(&mut self, index: usize, delta: f64) {
        if self.arena.snakes[index].ai {
            if let Some(direction) = ai::choose_direction(&self.arena, &self.arena.snakes[index]) {
                self.arena.snakes[index].pending_direction = direction;
            }
        }

        let snake = &mut self.arena.snakes[index];
        if snake.decay_boost(delta) {
            debug_snake!(snake.id, self.steps, "boost expired");
        }

        match self.arena.classify_move(index) {
            MoveOutcome::Blocked(collision) => self.handle_collision(index, collision),
            MoveOutcome::Clear(cell) => {
                let food_index = self.arena.food_index_at(cell);
                self.arena.snakes[index].advance_to(cell, food_index.is_some());
                if let Some(food_index) = food_index {
                    let food = self.arena.foods.remove(food_index);
                    self.apply_food_effect(index, food.kind);
                    self.arena.replenish_food(self.food_bias, &mut self.rng);
                }
            }
        }
    }

    fn handle_collision(&mut self, index: usize, collision: Collision) {
        self.score = self.score.saturating_sub(COLLISION_PENALTY);
        let cell = self.arena.respawn_cell(index, &mut self.rng);
        let snake = &mut self.arena.snakes[index];
        match cell {
            Some(cell) => {
                debug_snake!(snake.id, self.steps, "{:?} collision at {}, respawning at {}", collision, snake.head(), cell);
                snake.respawn(cell);
            }
            // Every other cell is taken; the body stays put until room opens up
            None => warn!("No free cell to respawn {}", snake.name),
        }
        let message = collision.describe(&snake.name);
        self.set_status(message);
    }

    fn apply_food_effect(&mut self, index: usize, kind: FoodKind) {
        self.score += FOOD_SCORE;
        let name = self.arena.snakes[index].name.clone();
        debug_food!("{} ate {:?} food on Step {}", name, kind, self.steps);

        let message = match kind {
            FoodKind::Classic => format!("{} gobbled neon bytes.", name),
            FoodKind::Speed => {
                self.arena.snakes[index].engage_boost();
                format!("{} engaged turbo boosters!", name)
            }
            FoodKind::Chroma => {
                let color = CHROMA_PALETTE[self.rng.gen_range(0..CHROMA_PALETTE.len())];
                self.arena.snakes[index].color = color;
                format!("{} shifted into a new chroma channel.", name)
            }
            FoodKind::Clone => {
                let head = if self.arena.snakes.len() < MAX_SNAKES {
                    self.arena.free_cell(&mut self.rng)
                } else {
                    None
                };
                match head {
                    Some(head) => {
                        let id = self.next_id;
                        let ally = self.create_snake(true, format!("Synth Snake {}", id), head);
                        self.arena.snakes.push(ally);
                    }
                    None => self.score += CLONE_OVERFLOW_BONUS,
                }
                format!("{} spawned a synth ally.", name)
            }
        };
        self.set_status(message);
    }

    fn create_snake(&mut self, ai: bool, name: String, head: Cell) -> Snake {
        let id = self.next_id;
        self.next_id += 1;
        let direction = if self.rng.gen_bool(0.5) { Direction::Right } else { Direction::Down };
        Snake::new(id, name, head, direction, ai)
    }

    // --- Exports ---

    pub fn scene(&self) -> Scene {
        Scene::capture(&self.arena)
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            score: self.score,
            players: self.arena.snakes.len(),
            ai_snakes: self.arena.snakes.iter().filter(|snake| snake.ai).count(),
            speed: SpeedLabel::from_flags(self.turbo, self.turbo_hold),
            boundary: self.arena.policy.into(),
        }
    }

    /// Most recent notable event.
    pub fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        info!("{}", self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::{self, Food};
    use crate::scene::BoundaryLabel;
    use assert_approx_eq::assert_approx_eq;
    use std::collections::{HashSet, VecDeque};

    // 360x360 px -> 20x20 cells
    fn test_game() -> Game {
        Game::with_seed(360, 360, 1234).expect("valid surface")
    }

    fn place(game: &mut Game, index: usize, cells: &[Cell], direction: Direction) {
        let snake = &mut game.arena.snakes[index];
        snake.segments = cells.iter().copied().collect();
        snake.direction = direction;
        snake.pending_direction = direction;
    }

    fn foods(cells: &[(Cell, FoodKind)]) -> Vec<Food> {
        cells.iter().map(|(cell, kind)| Food::new(*cell, *kind)).collect()
    }

    #[test]
    fn test_missing_surface_is_fatal() {
        assert_eq!(
            Game::new(0, 480).err(),
            Some(GameError::MissingSurface { width: 0, height: 480 })
        );
        assert!(Game::with_seed(640, 0, 1).is_err());
    }

    #[test]
    fn test_reset_defaults() {
        let mut game = test_game();
        game.set_turbo(true);
        game.set_hard_mode(true);
        game.set_food_bias(FoodBias::Prefer(FoodKind::Clone));
        game.set_obstacles(ObstacleMode::Pulse);
        game.add_snake(true).expect("room for a snake");
        game.score = 120;

        for _ in 0..2 {
            game.reset();
            assert_eq!(game.arena.grid, Grid::new(20, 20));
            assert_eq!(game.arena.snakes.len(), 1);
            assert!(!game.arena.snakes[0].ai);
            assert_eq!(game.arena.snakes[0].id, 1);
            assert_eq!(game.arena.snakes[0].name, "Player One");
            assert_eq!(game.arena.snakes[0].len(), 1);
            assert_eq!(game.score, 0);
            assert!(!game.running && !game.turbo && !game.turbo_hold);
            assert_eq!(game.arena.policy, BoundaryPolicy::Wrap);
            assert_eq!(game.food_bias, FoodBias::Random);
            assert_eq!(game.arena.obstacle_mode, ObstacleMode::None);
            assert!(game.arena.obstacles.active_cells().is_empty());
            assert_eq!(game.arena.foods.len(), 2);
            assert_eq!(game.status(), BOOT_STATUS);
        }
    }

    #[test]
    fn test_classic_food_scenario() {
        let mut game = test_game();
        place(&mut game, 0, &[Cell::new(5, 5)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(6, 5), FoodKind::Classic)]);

        game.step(170.0);

        assert_eq!(
            game.arena.snakes[0].segments,
            VecDeque::from([Cell::new(6, 5), Cell::new(5, 5)])
        );
        assert_eq!(game.score, 10);
        assert!(game.arena.food_index_at(Cell::new(6, 5)).is_none());
        assert_eq!(game.arena.foods.len(), food::target_count(1));
        assert_eq!(game.status(), "Player One gobbled neon bytes.");
    }

    #[test]
    fn test_hard_mode_edge_resets_snake() {
        let mut game = test_game();
        game.set_hard_mode(true);
        place(&mut game, 0, &[Cell::new(19, 5), Cell::new(18, 5)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(0, 0), FoodKind::Classic), (Cell::new(0, 1), FoodKind::Classic)]);
        game.score = 30;

        game.step(170.0);

        let snake = &game.arena.snakes[0];
        assert_eq!(game.score, 5);
        assert_eq!(snake.len(), 1);
        assert!(game.arena.grid.contains(snake.head()));
        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(game.status(), "Player One slammed the synthwall.");

        // Penalty floors at zero
        place(&mut game, 0, &[Cell::new(19, 7)], Direction::Right);
        game.score = 10;
        game.step(170.0);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_wrap_mode_edge_wraps() {
        let mut game = test_game();
        place(&mut game, 0, &[Cell::new(19, 5)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(0, 10), FoodKind::Classic), (Cell::new(0, 11), FoodKind::Classic)]);

        game.step(170.0);

        assert_eq!(game.arena.snakes[0].segments, VecDeque::from([Cell::new(0, 5)]));
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_hazard_collision() {
        let mut game = test_game();
        game.set_obstacles(ObstacleMode::Corner);
        place(&mut game, 0, &[Cell::new(0, 1)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(10, 10), FoodKind::Classic), (Cell::new(10, 11), FoodKind::Classic)]);
        game.score = 40;

        game.step(170.0);

        assert_eq!(game.score, 15);
        assert_ne!(game.arena.snakes[0].head(), Cell::new(1, 1));
        assert_eq!(game.status(), "Player One crashed into a hazard.");
    }

    #[test]
    fn test_clone_food_spawns_ally() {
        let mut game = test_game();
        place(&mut game, 0, &[Cell::new(5, 5)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(6, 5), FoodKind::Clone), (Cell::new(0, 19), FoodKind::Classic)]);

        game.step(170.0);

        assert_eq!(game.arena.snakes.len(), 2);
        assert_eq!(game.score, 10);
        let ally = &game.arena.snakes[1];
        assert!(ally.ai);
        assert_eq!(ally.len(), 1);
        assert_eq!(ally.name, format!("Synth Snake {}", ally.id));
        assert!(!game.arena.snakes[0].occupies(ally.head()));
        assert_eq!(game.arena.foods.len(), food::target_count(2));
    }

    #[test]
    fn test_clone_food_at_capacity_awards_bonus() {
        let mut game = test_game();
        for _ in 0..3 {
            game.add_snake(false).expect("room for a snake");
        }
        // The eater moves last so its replacement food cannot land in front of the others
        place(&mut game, 0, &[Cell::new(5, 10)], Direction::Right);
        place(&mut game, 1, &[Cell::new(5, 14)], Direction::Right);
        place(&mut game, 2, &[Cell::new(5, 17)], Direction::Right);
        place(&mut game, 3, &[Cell::new(5, 5)], Direction::Right);
        game.arena.foods = foods(&[
            (Cell::new(6, 5), FoodKind::Clone),
            (Cell::new(15, 0), FoodKind::Classic),
            (Cell::new(15, 2), FoodKind::Classic),
        ]);

        game.step(170.0);

        assert_eq!(game.arena.snakes.len(), 4);
        assert_eq!(game.score, 25);
    }

    #[test]
    fn test_speed_food_boost_expires() {
        let mut game = test_game();
        place(&mut game, 0, &[Cell::new(5, 5)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(6, 5), FoodKind::Speed), (Cell::new(0, 19), FoodKind::Classic)]);

        game.step(170.0);
        assert_approx_eq!(game.arena.snakes[0].speed_bonus, 1.65);
        assert_approx_eq!(game.arena.snakes[0].boost_ms, 5000.0);
        assert_eq!(game.status(), "Player One engaged turbo boosters!");

        // Keep row 5 clear so nothing else gets eaten
        game.arena.foods = foods(&[(Cell::new(0, 19), FoodKind::Classic), (Cell::new(1, 19), FoodKind::Classic)]);

        // Personal time runs at elapsed / 1.65
        game.step(1.65 * 3000.0);
        assert_approx_eq!(game.arena.snakes[0].speed_bonus, 1.65);
        assert_approx_eq!(game.arena.snakes[0].boost_ms, 2000.0, 1e-6);

        game.step(1.65 * 3000.0);
        assert_approx_eq!(game.arena.snakes[0].speed_bonus, 1.0);
        assert!(!game.arena.snakes[0].is_boosted());
    }

    #[test]
    fn test_chroma_food_recolors() {
        let mut game = test_game();
        place(&mut game, 0, &[Cell::new(5, 5)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(6, 5), FoodKind::Chroma), (Cell::new(0, 19), FoodKind::Classic)]);

        game.step(170.0);

        assert!(CHROMA_PALETTE.contains(&game.arena.snakes[0].color));
        assert_eq!(game.score, 10);
    }

    #[test]
    fn test_earlier_snake_wins_contested_cell() {
        let mut game = test_game();
        game.add_snake(false).expect("room for a snake");
        place(&mut game, 0, &[Cell::new(5, 5)], Direction::Right);
        place(&mut game, 1, &[Cell::new(7, 5)], Direction::Left);
        game.arena.foods = foods(&[
            (Cell::new(0, 19), FoodKind::Classic),
            (Cell::new(1, 19), FoodKind::Classic),
            (Cell::new(2, 19), FoodKind::Classic),
        ]);

        game.step(170.0);

        assert_eq!(game.arena.snakes[0].head(), Cell::new(6, 5));
        assert_eq!(game.arena.snakes[1].len(), 1);
        assert_ne!(game.arena.snakes[1].head(), Cell::new(6, 5));
        assert_eq!(game.arena.snakes.len(), 2);
        assert_eq!(game.status(), "Player 2 tangled with another serpent.");
    }

    #[test]
    fn test_invariants_hold_over_many_steps() {
        let mut game = Game::with_seed(360, 360, 99).expect("valid surface");
        for _ in 0..3 {
            game.add_snake(true).expect("room for a snake");
        }
        game.set_obstacles(ObstacleMode::Pulse);

        for step in 0..600 {
            if step == 300 {
                game.set_hard_mode(true);
                game.set_obstacles(ObstacleMode::Grid);
            }
            if step == 450 {
                game.remove_snake().expect("roster above minimum");
                game.remove_snake().expect("roster above minimum");
            }
            game.step(170.0);

            assert!((1..=MAX_SNAKES).contains(&game.arena.snakes.len()));
            let mut seen: HashSet<Cell> = HashSet::new();
            for snake in &game.arena.snakes {
                assert!(snake.len() >= 1);
                assert!(snake.segments.iter().all(|c| game.arena.grid.contains(*c)));
                let cells: HashSet<Cell> = snake.segments.iter().copied().collect();
                assert!(seen.is_disjoint(&cells), "snakes overlap on step {}", step);
                seen.extend(cells);
            }
            assert!(game.arena.foods.len() <= food::target_count(game.arena.snakes.len()));
            assert!(game.arena.foods.iter().all(|f| !seen.contains(&f.cell)));
        }
    }

    #[test]
    fn test_removing_snakes_trims_food() {
        let mut game = Game::with_seed(360, 360, 7).expect("valid surface");
        game.add_snake(true).expect("room for a snake");
        game.add_snake(true).expect("room for a snake");
        assert_eq!(game.arena.foods.len(), 3);
        let oldest = game.arena.foods[0];

        game.remove_snake().expect("roster above minimum");
        game.remove_snake().expect("roster above minimum");
        assert_eq!(game.arena.foods.len(), food::target_count(1));
        assert_eq!(game.arena.foods[0], oldest);

        game.step(170.0);
        assert!(game.arena.foods.len() <= food::target_count(game.arena.snakes.len()));
    }

    #[test]
    fn test_obstacle_change_replaces_covered_food() {
        let mut game = test_game();
        place(&mut game, 0, &[Cell::new(10, 10)], Direction::Right);
        game.arena.foods = foods(&[(Cell::new(2, 2), FoodKind::Classic), (Cell::new(7, 12), FoodKind::Speed)]);

        game.set_obstacles(ObstacleMode::Corner);

        assert_eq!(game.arena.foods.len(), 2);
        assert!(!game.arena.foods.iter().any(|f| f.cell == Cell::new(2, 2)));
        assert!(game.arena.foods.iter().all(|f| !game.arena.obstacles.blocks(f.cell)));
    }

    #[test]
    fn test_tick_gates_on_interval() {
        let mut game = test_game();
        assert!(game.tick(0.0).is_none(), "not running yet");

        game.start();
        assert!(game.tick(1000.0).is_none(), "first tick only records the time");
        assert!(game.tick(1100.0).is_none());
        assert!(game.tick(1170.0).is_some());
        assert_eq!(game.steps, 1);

        game.set_turbo(true);
        assert_approx_eq!(game.step_interval(), 1000.0 / 6.0 / 1.4);
        assert!(game.tick(1290.0).is_some());
        assert_eq!(game.steps, 2);

        game.toggle_turbo_hold();
        assert_approx_eq!(game.step_interval(), 1000.0 / 6.0);
        assert!(game.tick(1440.0).is_none());
        assert!(game.tick(1460.0).is_some());

        game.stop();
        assert!(game.tick(5000.0).is_none());
        assert_eq!(game.steps, 3);
        assert_eq!(game.arena.snakes.len(), 1, "stop keeps state");
    }

    #[test]
    fn test_start_resets_state() {
        let mut game = test_game();
        game.score = 50;
        game.set_hard_mode(true);
        game.start();
        assert!(game.running);
        assert_eq!(game.score, 0);
        assert_eq!(game.arena.policy, BoundaryPolicy::Wrap);
    }

    #[test]
    fn test_steer() {
        let mut game = test_game();
        place(&mut game, 0, &[Cell::new(5, 5)], Direction::Right);
        assert!(!game.steer(0, Direction::Left), "reversal ignored");
        assert_eq!(game.arena.snakes[0].pending_direction, Direction::Right);
        assert!(game.steer(0, Direction::Up));
        assert_eq!(game.arena.snakes[0].pending_direction, Direction::Up);
        assert!(!game.steer(3, Direction::Up), "no such player");
    }

    #[test]
    fn test_steer_takes_over_synth_snake() {
        let mut game = test_game();
        game.add_snake(true).expect("room for a snake");
        place(&mut game, 1, &[Cell::new(10, 10)], Direction::Down);
        game.handle(Command::Steer { player: 1, direction: Direction::Left });
        assert!(!game.arena.snakes[1].ai);
        assert_eq!(game.arena.snakes[1].pending_direction, Direction::Left);
        assert_eq!(game.status(), "Player 2 grabbed manual control.");
        assert_eq!(game.metrics().ai_snakes, 0);
    }

    #[test]
    fn test_turbo_hold_requires_turbo() {
        let mut game = test_game();
        game.toggle_turbo_hold();
        assert!(!game.turbo_hold);
        assert_eq!(game.metrics().speed, SpeedLabel::Cruise);

        game.handle(Command::SetTurbo(true));
        assert_eq!(game.metrics().speed, SpeedLabel::Turbo);
        game.handle(Command::ToggleTurboHold);
        assert_eq!(game.metrics().speed, SpeedLabel::Hold);
        assert_eq!(game.status(), "Turbo held. Drift through the beat.");

        // Re-enabling turbo clears the hold
        game.handle(Command::SetTurbo(true));
        assert!(!game.turbo_hold);
    }

    #[test]
    fn test_roster_capacity() {
        let mut game = test_game();
        for expected in 2..=4 {
            game.handle(Command::AddSnake);
            assert_eq!(game.arena.snakes.len(), expected);
        }
        assert_eq!(game.status(), "Synth Snake 4 beamed in.");
        assert_eq!(game.arena.foods.len(), 3);

        assert_eq!(game.add_snake(true), Err(GameError::RosterFull { max: 4 }));
        assert_eq!(game.arena.snakes.len(), 4);
        assert_eq!(game.status(), "Snake limit reached. The grid is full.");

        let removed = game.remove_snake().expect("roster above minimum");
        assert_eq!(removed.name, "Synth Snake 4");
        assert_eq!(game.status(), "Synth Snake 4 faded into the grid.");
        game.handle(Command::RemoveSnake);
        game.handle(Command::RemoveSnake);
        assert_eq!(game.arena.snakes.len(), 1);

        assert!(matches!(game.remove_snake(), Err(GameError::RosterMinimum { min: 1 })));
        assert_eq!(game.arena.snakes.len(), 1);
        assert_eq!(game.status(), "Need at least one serpent to keep the show going.");
    }

    #[test]
    fn test_metrics() {
        let mut game = test_game();
        game.add_snake(true).expect("room for a snake");
        game.handle(Command::SetHardMode(true));
        game.score = 42;
        let metrics = game.metrics();
        assert_eq!(metrics.score, 42);
        assert_eq!(metrics.players, 2);
        assert_eq!(metrics.ai_snakes, 1);
        assert_eq!(metrics.speed, SpeedLabel::Cruise);
        assert_eq!(metrics.boundary, BoundaryLabel::Solid);
    }

    #[test]
    fn test_configuration_commands() {
        let mut game = test_game();
        game.handle(Command::SetFoodBias(FoodBias::Prefer(FoodKind::Speed)));
        assert_eq!(game.food_bias, FoodBias::Prefer(FoodKind::Speed));
        assert_eq!(game.status(), "Food synthesizer tuned to Speed.");

        game.handle(Command::SetObstacles(ObstacleMode::Corner));
        assert_eq!(game.arena.obstacles.active_cells().len(), 12);
        assert_eq!(game.status(), "Obstacle pattern set to Corners.");

        game.handle(Command::SetHardMode(false));
        assert_eq!(game.status(), "Wrap mode: glide forever.");
        assert!(!game.scene().hard_mode);
    }

    #[test]
    fn test_pulse_flips_every_twelve_steps() {
        let mut game = test_game();
        game.set_obstacles(ObstacleMode::Pulse);
        let band_a = Cell::new(4, 8);
        let band_b = Cell::new(8, 4);
        for _ in 0..11 {
            game.step(170.0);
        }
        assert!(game.arena.obstacles.blocks(band_a));
        game.step(170.0);
        assert!(game.arena.obstacles.blocks(band_b));
        assert!(!game.arena.obstacles.blocks(band_a));
        assert!(game.scene().obstacles.contains(&band_b));
    }

    #[test]
    fn test_resize_recomputes_grid() {
        let mut game = test_game();
        game.set_obstacles(ObstacleMode::Corner);
        game.resize(640, 480);
        assert_eq!(game.arena.grid, Grid::new(35, 26));
        assert!(game.arena.obstacles.blocks(Cell::new(33, 1)));

        game.resize(0, 0);
        assert_eq!(game.arena.grid, Grid::new(35, 26));
    }
}
