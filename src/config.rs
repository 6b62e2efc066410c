//! Configuration constants for the serpent grid.

// Grid geometry
pub const CELL_SIZE: u32 = 18; // Pixels per grid cell
pub const MIN_GRID_CELLS: u32 = 12; // Minimum columns and rows
pub const MIN_DISPLAY_WIDTH: u32 = 320; // Display area is clamped up to this before division
pub const MIN_DISPLAY_HEIGHT: u32 = 240;

// Timing
pub const BASE_SPEED: f64 = 6.0; // Steps per second at cruise
pub const TURBO_MULTIPLIER: f64 = 1.4; // Step rate factor while turbo is live
pub const STEP_INTERVAL_MS: f64 = 1000.0 / BASE_SPEED;

// Roster
pub const MAX_SNAKES: usize = 4;
pub const MIN_SNAKES: usize = 1;

// Food
pub const MAX_FOOD: usize = 3;
pub const SPAWN_ATTEMPTS: u32 = 200; // Random probes before the deterministic scan
pub const DEFAULT_FOOD_WEIGHTS: [f64; 4] = [0.45, 0.25, 0.20, 0.10]; // classic, speed, chroma, clone
pub const BIASED_FOOD_WEIGHT: f64 = 0.45; // Weight of the preferred kind when a bias is set

// Scoring
pub const FOOD_SCORE: u32 = 10;
pub const CLONE_OVERFLOW_BONUS: u32 = 15; // Extra points for clone food at full roster
pub const COLLISION_PENALTY: u32 = 25;

// Speed boost
pub const BOOST_MULTIPLIER: f64 = 1.65;
pub const BOOST_DURATION_MS: f64 = 5000.0;

// Obstacles
pub const PULSE_INTERVAL: u32 = 12; // Steps between pulse set toggles
pub const PULSE_REACH: i32 = 6; // Max band half-length around the center
pub const PULSE_OFFSET: i32 = 2; // Distance of each band from the center line
pub const GRID_OBSTACLE_MARGIN_X: i32 = 4;
pub const GRID_OBSTACLE_MARGIN_Y: i32 = 2;
pub const GRID_OBSTACLE_STEP_X: usize = 6;
pub const GRID_OBSTACLE_STEP_Y: usize = 2;

// Host window
pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 640;
pub const HUD_PANEL_WIDTH: i32 = 220; // Width of the side panel
