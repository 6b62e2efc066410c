use macroquad::prelude::*;
use neon_serpents::config::HUD_PANEL_WIDTH;
use neon_serpents::scene::{Metrics, Scene};
use neon_serpents::types::{Cell, Rgb};

const BACKGROUND: Color = Color::new(0.04, 0.0, 0.16, 1.0);
const GRID_LINE: Color = Color::new(1.0, 1.0, 1.0, 0.05);
const HAZARD: Color = Color::new(1.0, 0.0, 0.5, 0.6);
const PANEL: Color = Color::new(0.08, 0.0, 0.22, 1.0);

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.0, rgb.1, rgb.2, 255)
}

// Lightens a color for heads and outlines
fn brighten_color(color: Color, amount: f32) -> Color {
    Color::new(
        (color.r + amount).min(1.0),
        (color.g + amount).min(1.0),
        (color.b + amount).min(1.0),
        color.a,
    )
}

// Handles drawing scene snapshots and the HUD panel using macroquad
pub struct Renderer {
    cell_size: f32,
    board: Vec2,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { cell_size: 1.0, board: Vec2::ZERO }
    }

    /// Draws one frame. `paused` shows the start prompt over the board.
    pub fn draw_frame(&mut self, scene: &Scene, metrics: &Metrics, status: &str, paused: bool) {
        self.board = board_size();
        // Square cells sized to fit the board area
        self.cell_size = (self.board.x / scene.cols as f32).min(self.board.y / scene.rows as f32);

        clear_background(BACKGROUND);
        self.draw_grid(scene);
        self.draw_obstacles(&scene.obstacles);
        self.draw_food(scene);
        self.draw_snakes(scene);
        if scene.hard_mode {
            self.draw_walls(scene);
        }
        self.draw_ui_panel(metrics, status);

        if paused {
            self.draw_announcement("Press Enter to start");
        }
    }

    fn cell_origin(&self, cell: Cell) -> Vec2 {
        vec2(cell.x as f32 * self.cell_size, cell.y as f32 * self.cell_size)
    }

    fn draw_grid(&self, scene: &Scene) {
        let width = scene.cols as f32 * self.cell_size;
        let height = scene.rows as f32 * self.cell_size;
        for col in 0..=scene.cols {
            let x = col as f32 * self.cell_size;
            draw_line(x, 0.0, x, height, 1.0, GRID_LINE);
        }
        for row in 0..=scene.rows {
            let y = row as f32 * self.cell_size;
            draw_line(0.0, y, width, y, 1.0, GRID_LINE);
        }
    }

    fn draw_walls(&self, scene: &Scene) {
        draw_rectangle_lines(
            1.0,
            1.0,
            scene.cols as f32 * self.cell_size - 2.0,
            scene.rows as f32 * self.cell_size - 2.0,
            2.0,
            HAZARD,
        );
    }

    fn draw_obstacles(&self, obstacles: &[Cell]) {
        let inset = 2.0;
        for cell in obstacles {
            let origin = self.cell_origin(*cell);
            draw_rectangle(
                origin.x + inset,
                origin.y + inset,
                self.cell_size - inset * 2.0,
                self.cell_size - inset * 2.0,
                HAZARD,
            );
        }
    }

    fn draw_food(&self, scene: &Scene) {
        let inset = 3.0;
        for food in &scene.foods {
            let origin = self.cell_origin(food.cell);
            let color = to_color(food.kind.color());
            let size = self.cell_size - inset * 2.0;
            draw_rectangle(origin.x + inset, origin.y + inset, size, size, color);
            draw_rectangle_lines(origin.x + inset, origin.y + inset, size, size, 1.0, brighten_color(color, 0.3));
        }
    }

    fn draw_snakes(&self, scene: &Scene) {
        let outline = Color::new(1.0, 1.0, 1.0, 0.3);
        for snake in &scene.snakes {
            let body = to_color(snake.color);
            for (index, segment) in snake.segments.iter().enumerate() {
                let origin = self.cell_origin(*segment);
                let size = self.cell_size - 3.0;
                // Heads stand out from the body
                let fill = if index == 0 { brighten_color(body, 0.25) } else { body };
                draw_rectangle(origin.x + 1.5, origin.y + 1.5, size, size, fill);
                draw_rectangle_lines(origin.x + 1.5, origin.y + 1.5, size, size, 1.0, outline);
            }
        }
    }

    fn draw_ui_panel(&self, metrics: &Metrics, status: &str) {
        let panel_x = self.board.x;
        let padding = 12.0;
        draw_rectangle(panel_x, 0.0, HUD_PANEL_WIDTH as f32, self.board.y, PANEL);

        let x = panel_x + padding;
        let mut y = 36.0;
        draw_text("NEON SERPENTS", x, y, 28.0, to_color(Rgb::hex(0x08f7fe)));
        y += 40.0;

        let rows = [
            format!("Score: {}", metrics.score),
            format!("Players: {}", metrics.players),
            format!("AI: {}", metrics.ai_snakes),
            format!("Speed: {}", metrics.speed.label()),
            format!("Boundaries: {}", metrics.boundary.label()),
        ];
        for row in &rows {
            draw_text(row, x, y, 22.0, WHITE);
            y += 28.0;
        }

        y += 12.0;
        for line in wrap_text(status, 22) {
            draw_text(&line, x, y, 18.0, LIGHTGRAY);
            y += 20.0;
        }

        let hints = [
            "Arrows / WASD: steer",
            "Space: hold turbo",
            "T turbo  H walls",
            "F food  O obstacles",
            "= add  - remove",
            "Enter start  P stop",
            "R reset  Esc quit",
        ];
        let mut hint_y = self.board.y - padding - (hints.len() as f32 - 1.0) * 18.0;
        for hint in hints {
            draw_text(hint, x, hint_y, 16.0, GRAY);
            hint_y += 18.0;
        }
    }

    fn draw_announcement(&self, msg: &str) {
        let font_size = 36.0;
        let dims = measure_text(msg, None, font_size as u16, 1.0);
        let x = (self.board.x - dims.width) / 2.0;
        let y = self.board.y / 2.0;
        draw_rectangle(x - 16.0, y - dims.height - 16.0, dims.width + 32.0, dims.height + 32.0, Color::new(0.0, 0.0, 0.0, 0.7));
        draw_text(msg, x, y, font_size, WHITE);
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }
}

/// Window area left for the grid once the HUD panel is reserved.
pub fn board_size() -> Vec2 {
    vec2((screen_width() - HUD_PANEL_WIDTH as f32).max(0.0), screen_height())
}

/// Greedy word wrap for the narrow status panel.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
