//! Real-time multi-snake grid simulation.
//!
//! [`game::Game`] owns the whole state and is driven by a host through
//! [`game::Game::tick`] (wall-clock gated) or [`game::Game::step`] (one committed step).
//! Rendering and input devices stay on the host side; the host reads [`scene::Scene`]
//! and [`scene::Metrics`] back after each step.

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod logging;
pub mod obstacles;
pub mod scene;
pub mod snake;
pub mod types;

pub use error::GameError;
pub use game::Game;
pub use scene::{Metrics, Scene};
pub use types::{Command, Direction, FoodBias, FoodKind, ObstacleMode};
