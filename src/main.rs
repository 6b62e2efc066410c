mod input;
mod render;

use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use neon_serpents::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use neon_serpents::{Command, FoodBias, FoodKind, Game, ObstacleMode, logging};

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Start with turbo enabled
    #[arg(long)]
    turbo: bool,

    /// Start with solid boundaries instead of wrap-around
    #[arg(long)]
    hard: bool,

    /// Preferred food kind (random, classic, speed, chroma, clone)
    #[arg(long, default_value = "random", value_parser = parse_food_bias)]
    food_bias: FoodBias,

    /// Obstacle layout (none, corners, grid, pulse)
    #[arg(long, default_value = "none", value_parser = parse_obstacles)]
    obstacles: ObstacleMode,

    /// AI snakes to add next to Player One
    #[arg(long, default_value_t = 0)]
    ai_snakes: usize,

    /// Debug filter to specify log topics (e.g., "tick,snake,ai")
    /// Available topics: tick, snake, ai, food, obstacle
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_food_bias(value: &str) -> Result<FoodBias, String> {
    match value.to_lowercase().as_str() {
        "random" => Ok(FoodBias::Random),
        "classic" => Ok(FoodBias::Prefer(FoodKind::Classic)),
        "speed" => Ok(FoodBias::Prefer(FoodKind::Speed)),
        "chroma" => Ok(FoodBias::Prefer(FoodKind::Chroma)),
        "clone" => Ok(FoodBias::Prefer(FoodKind::Clone)),
        other => Err(format!("unknown food kind '{}'", other)),
    }
}

fn parse_obstacles(value: &str) -> Result<ObstacleMode, String> {
    match value.to_lowercase().as_str() {
        "none" => Ok(ObstacleMode::None),
        "corner" | "corners" => Ok(ObstacleMode::Corner),
        "grid" => Ok(ObstacleMode::Grid),
        "pulse" => Ok(ObstacleMode::Pulse),
        other => Err(format!("unknown obstacle mode '{}'", other)),
    }
}

impl Args {
    /// Commands replaying the requested setup on a freshly started game.
    fn setup_commands(&self) -> Vec<Command> {
        let mut commands = vec![Command::Start];
        if self.turbo {
            commands.push(Command::SetTurbo(true));
        }
        if self.hard {
            commands.push(Command::SetHardMode(true));
        }
        if self.food_bias != FoodBias::Random {
            commands.push(Command::SetFoodBias(self.food_bias));
        }
        if self.obstacles != ObstacleMode::None {
            commands.push(Command::SetObstacles(self.obstacles));
        }
        commands.extend(std::iter::repeat_n(Command::AddSnake, self.ai_snakes));
        commands
    }
}

fn init_logging(args: &Args) {
    // RUST_LOG hands control to env_logger's filter syntax
    if std::env::var_os("RUST_LOG").is_some() {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Failed to initialize logger: {}", e);
        }
        return;
    }
    let level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Neon Serpents".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: true,
        ..Default::default()
    }
}

fn board_dimensions() -> (u32, u32) {
    let board = render::board_size();
    (board.x as u32, board.y as u32)
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    init_logging(&args);

    info!("Initializing Neon Serpents...");

    let (width, height) = board_dimensions();
    let created = match args.seed {
        Some(seed) => Game::with_seed(width, height, seed),
        None => Game::new(width, height),
    };
    let mut game = match created {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to create game: {}", e);
            std::process::exit(1);
        }
    };

    for command in args.setup_commands() {
        game.handle(command);
    }

    let mut renderer = render::Renderer::new();
    let mut surface = (width, height);

    while !render::Renderer::window_should_close() {
        let current = board_dimensions();
        if current != surface {
            surface = current;
            game.resize(current.0, current.1);
        }

        for command in input::poll_commands(&game) {
            game.handle(command);
        }

        game.tick(get_time() * 1000.0);
        renderer.draw_frame(&game.scene(), &game.metrics(), game.status(), !game.running);
        next_frame().await;
    }

    info!("Shutting down after {} steps", game.steps);
}
