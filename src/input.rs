// Keyboard bindings for the desktop host

use macroquad::prelude::*;
use neon_serpents::{Command, Direction, Game};

/// What a key press means, given the current settings for the cycling keys.
pub fn binding_for(key: KeyCode, game: &Game) -> Option<Command> {
    let steer = |player, direction| Some(Command::Steer { player, direction });
    match key {
        KeyCode::Up => steer(0, Direction::Up),
        KeyCode::Down => steer(0, Direction::Down),
        KeyCode::Left => steer(0, Direction::Left),
        KeyCode::Right => steer(0, Direction::Right),
        KeyCode::W => steer(1, Direction::Up),
        KeyCode::S => steer(1, Direction::Down),
        KeyCode::A => steer(1, Direction::Left),
        KeyCode::D => steer(1, Direction::Right),
        KeyCode::Space => Some(Command::ToggleTurboHold),
        KeyCode::T => Some(Command::SetTurbo(!game.turbo)),
        KeyCode::H => Some(Command::SetHardMode(!game.hard_mode())),
        KeyCode::F => Some(Command::SetFoodBias(game.food_bias.next())),
        KeyCode::O => Some(Command::SetObstacles(game.arena.obstacle_mode.next())),
        KeyCode::Equal | KeyCode::KpAdd => Some(Command::AddSnake),
        KeyCode::Minus | KeyCode::KpSubtract => Some(Command::RemoveSnake),
        KeyCode::Enter => Some(Command::Start),
        KeyCode::P => Some(Command::Stop),
        KeyCode::R => Some(Command::Reset),
        _ => None,
    }
}

/// Commands for every key pressed since the last frame.
pub fn poll_commands(game: &Game) -> Vec<Command> {
    get_keys_pressed()
        .into_iter()
        .filter_map(|key| binding_for(key, game))
        .collect()
}
