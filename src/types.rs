use std::fmt;

/// A grid cell. Coordinates are signed so projections can step off the board
/// before the boundary policy decides what that means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn manhattan(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector; y grows downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }

    /// Maps a unit offset back to a direction. Zero or diagonal offsets have none.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Display color as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Rgb {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const HUMAN_COLOR: Rgb = Rgb::hex(0xf72585);
pub const AI_COLOR: Rgb = Rgb::hex(0x08f7fe);
pub const CHROMA_PALETTE: [Rgb; 4] = [
    Rgb::hex(0x19ffaa),
    Rgb::hex(0xff4fd8),
    Rgb::hex(0x08f7fe),
    Rgb::hex(0xf5d300),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Classic,
    Speed,
    Chroma,
    Clone,
}

impl FoodKind {
    /// Order used for cumulative weight draws.
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Classic,
        FoodKind::Speed,
        FoodKind::Chroma,
        FoodKind::Clone,
    ];

    pub fn color(self) -> Rgb {
        match self {
            FoodKind::Classic => Rgb::hex(0x21f89c),
            FoodKind::Speed => Rgb::hex(0xff008e),
            FoodKind::Chroma => Rgb::hex(0x04f0ff),
            FoodKind::Clone => Rgb::hex(0xffe066),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FoodKind::Classic => "Classic",
            FoodKind::Speed => "Speed",
            FoodKind::Chroma => "Chroma",
            FoodKind::Clone => "Clone",
        }
    }
}

/// Food synthesizer preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoodBias {
    #[default]
    Random,
    Prefer(FoodKind),
}

impl FoodBias {
    pub fn label(self) -> &'static str {
        match self {
            FoodBias::Random => "Random",
            FoodBias::Prefer(kind) => kind.label(),
        }
    }

    /// Next setting in the host's cycling order.
    pub fn next(self) -> FoodBias {
        match self {
            FoodBias::Random => FoodBias::Prefer(FoodKind::Classic),
            FoodBias::Prefer(FoodKind::Classic) => FoodBias::Prefer(FoodKind::Speed),
            FoodBias::Prefer(FoodKind::Speed) => FoodBias::Prefer(FoodKind::Chroma),
            FoodBias::Prefer(FoodKind::Chroma) => FoodBias::Prefer(FoodKind::Clone),
            FoodBias::Prefer(FoodKind::Clone) => FoodBias::Random,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObstacleMode {
    #[default]
    None,
    Corner,
    Grid,
    Pulse,
}

impl ObstacleMode {
    pub fn label(self) -> &'static str {
        match self {
            ObstacleMode::None => "None",
            ObstacleMode::Corner => "Corners",
            ObstacleMode::Grid => "Grid",
            ObstacleMode::Pulse => "Pulse",
        }
    }

    pub fn next(self) -> ObstacleMode {
        match self {
            ObstacleMode::None => ObstacleMode::Corner,
            ObstacleMode::Corner => ObstacleMode::Grid,
            ObstacleMode::Grid => ObstacleMode::Pulse,
            ObstacleMode::Pulse => ObstacleMode::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    #[default]
    Wrap,
    Hard,
}

/// Commands delivered by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Steer { player: usize, direction: Direction },
    ToggleTurboHold,
    SetTurbo(bool),
    SetHardMode(bool),
    SetFoodBias(FoodBias),
    SetObstacles(ObstacleMode),
    Start,
    Stop,
    Reset,
    AddSnake,
    RemoveSnake,
}
