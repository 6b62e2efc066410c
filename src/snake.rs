use crate::config::{BOOST_DURATION_MS, BOOST_MULTIPLIER};
use crate::types::{AI_COLOR, Cell, Direction, HUMAN_COLOR, Rgb};
use std::collections::VecDeque;

// Represents one serpent on the grid
#[derive(Debug, Clone)]
pub struct Snake {
    pub id: u32,
    pub name: String,
    pub segments: VecDeque<Cell>, // Head first; never empty
    pub direction: Direction,
    pub pending_direction: Direction, // Applied on the next step
    pub speed_bonus: f64,
    pub boost_ms: f64, // Remaining boost time
    pub ai: bool,
    pub color: Rgb,
}

impl Snake {
    pub fn new(id: u32, name: String, head: Cell, direction: Direction, ai: bool) -> Self {
        Snake {
            id,
            name,
            segments: VecDeque::from([head]),
            direction,
            pending_direction: direction,
            speed_bonus: 1.0,
            boost_ms: 0.0,
            ai,
            color: Self::canonical_color(ai),
        }
    }

    pub fn canonical_color(ai: bool) -> Rgb {
        if ai { AI_COLOR } else { HUMAN_COLOR }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Back to a single segment at `head`, facing right, boost and color cleared.
    pub fn respawn(&mut self, head: Cell) {
        self.segments.clear();
        self.segments.push_back(head);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.speed_bonus = 1.0;
        self.boost_ms = 0.0;
        self.color = Self::canonical_color(self.ai);
    }

    /// Queues a turn unless it would reverse the snake onto itself.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_reverse_of(self.direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn engage_boost(&mut self) {
        self.speed_bonus = BOOST_MULTIPLIER;
        self.boost_ms = BOOST_DURATION_MS;
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_ms > 0.0
    }

    /// Burns `delta` ms of boost. Returns true when the boost ran out on this call.
    pub fn decay_boost(&mut self, delta: f64) -> bool {
        if self.boost_ms <= 0.0 {
            return false;
        }
        self.boost_ms -= delta;
        if self.boost_ms <= 0.0 {
            self.boost_ms = 0.0;
            self.speed_bonus = 1.0;
            return true;
        }
        false
    }

    /// Moves the head onto `cell`, keeping the tail when `grow` is set.
    pub fn advance_to(&mut self, cell: Cell, grow: bool) {
        self.segments.push_front(cell);
        self.direction = self.pending_direction;
        if !grow {
            self.segments.pop_back();
        }
    }
}
