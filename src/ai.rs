//! Greedy food-seeking steering for synth snakes.
//!
//! Every step the controller re-targets the nearest food by Manhattan distance and
//! walks an ordered list of candidate directions, taking the first one that is safe
//! to enter right now. It never plans further than one cell ahead.

use crate::arena::Arena;
use crate::snake::Snake;
use crate::types::Direction;

/// Direction the snake should take next, or `None` to keep its pending direction.
pub fn choose_direction(arena: &Arena, snake: &Snake) -> Option<Direction> {
    let head = snake.head();
    // min_by_key keeps the first of equally near items
    let target = arena.foods.iter().min_by_key(|food| food.cell.manhattan(&head))?;

    let dx = target.cell.x - head.x;
    let dy = target.cell.y - head.y;
    let horizontal = Direction::from_offset(dx.signum(), 0);
    let vertical = Direction::from_offset(0, dy.signum());
    let preferred = if dx.abs() >= dy.abs() { horizontal } else { vertical };

    let candidates = [preferred, horizontal, vertical, Some(snake.direction)];
    let choice = candidates.into_iter().flatten().find(|&option| {
        if option.is_reverse_of(snake.direction) {
            return false;
        }
        match arena.grid.project(head, option, arena.policy) {
            Some(next) => !arena.obstacles.blocks(next) && !arena.is_snake_at(next),
            None => false,
        }
    });

    crate::debug_ai!(
        snake.id,
        "target {} ({:?}) from {} -> {:?}",
        target.cell,
        target.kind,
        head,
        choice
    );
    choice
}
