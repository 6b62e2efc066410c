use crate::config::{BIASED_FOOD_WEIGHT, DEFAULT_FOOD_WEIGHTS, MAX_FOOD};
use crate::types::{Cell, FoodBias, FoodKind};
use rand::Rng;

/// A food item on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(cell: Cell, kind: FoodKind) -> Self {
        Food { cell, kind }
    }
}

/// Live food the board should hold for a roster of `roster_size` snakes.
pub fn target_count(roster_size: usize) -> usize {
    MAX_FOOD.min(1 + roster_size)
}

/// Draw weights in `FoodKind::ALL` order.
pub fn weights(bias: FoodBias) -> [f64; 4] {
    match bias {
        FoodBias::Random => DEFAULT_FOOD_WEIGHTS,
        FoodBias::Prefer(preferred) => {
            let rest = (1.0 - BIASED_FOOD_WEIGHT) / 3.0;
            FoodKind::ALL.map(|kind| if kind == preferred { BIASED_FOOD_WEIGHT } else { rest })
        }
    }
}

/// Picks a kind from a single uniform draw in [0, 1) against cumulative weights.
pub fn pick_kind(bias: FoodBias, roll: f64) -> FoodKind {
    let mut cumulative = 0.0;
    for (kind, weight) in FoodKind::ALL.iter().zip(weights(bias)) {
        cumulative += weight;
        if roll <= cumulative {
            return *kind;
        }
    }
    // Rounding can leave the final cumulative weight just short of 1.0
    FoodKind::Classic
}

/// Resolves the kind for a new item: an explicit request wins, otherwise a weighted draw.
pub fn choose_kind<R: Rng>(requested: Option<FoodKind>, bias: FoodBias, rng: &mut R) -> FoodKind {
    requested.unwrap_or_else(|| pick_kind(bias, rng.gen_range(0.0..1.0)))
}
