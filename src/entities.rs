use crate::constants::*;
use crate::geometry::is_collision;
use crate::rendering::{Color, Rasterizer, draw_wireframe_model};
use crate::types::{Vector2D, wrap_position};

// --- Ship ---
#[derive(Clone, Debug)]
pub struct Ship {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub heading: f64, // Radians, 0 points up the screen
    pub model: Vec<Vector2D>,
}

impl Ship {
    pub fn new(x: f64, y: f64) -> Self {
        Ship {
            position: Vector2D::new(x, y),
            velocity: Vector2D::ZERO,
            heading: 0.0,
            model: SHIP_MODEL.iter().map(|&(x, y)| Vector2D::new(x, y)).collect(),
        }
    }

    /// Turns the ship; `direction` is -1.0 for left and 1.0 for right.
    pub fn rotate(&mut self, direction: f64, elapsed_time: f64) {
        self.heading += direction * SHIP_TURN_RATE * elapsed_time;
    }

    // No drag and no speed cap: the ship keeps whatever it builds up.
    pub fn thrust(&mut self, elapsed_time: f64) {
        self.velocity += Vector2D::from_heading(self.heading) * (SHIP_THRUST * elapsed_time);
    }

    pub fn fire(&self) -> Bullet {
        Bullet::new(self.position, Vector2D::from_heading(self.heading) * BULLET_SPEED)
    }

    pub fn update(&mut self, elapsed_time: f64, width: f64, height: f64) {
        self.position += self.velocity * elapsed_time;
        wrap_position(&mut self.position, width, height);
    }

    /// Puts the ship back at `centre` at rest. The heading is kept.
    pub fn reset(&mut self, centre: Vector2D) {
        self.position = centre;
        self.velocity = Vector2D::ZERO;
    }

    pub fn draw(&self, screen: &mut dyn Rasterizer) {
        draw_wireframe_model(screen, &self.model, self.position, self.heading, 1.0, Color::White);
    }
}

// --- Asteroid ---
#[derive(Clone, Debug)]
pub struct Asteroid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub angle: f64,
    pub angular_velocity: f64,
    pub size: u8, // 2 = large, 1 = medium, 0 = small
    pub model: Vec<Vector2D>,
}

impl Asteroid {
    pub fn score(&self) -> u32 {
        SCORE_PER_SIZE_STEP * (3 - u32::from(self.size))
    }

    /// Size of the pieces this asteroid breaks into, if it breaks at all.
    pub fn split_size(&self) -> Option<u8> {
        self.size.checked_sub(1)
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        is_collision(point, self.position, &self.model, self.angle)
    }

    pub fn update(&mut self, elapsed_time: f64, width: f64, height: f64) {
        self.position += self.velocity * elapsed_time;
        self.angle += self.angular_velocity * elapsed_time;
        wrap_position(&mut self.position, width, height);
    }

    pub fn draw(&self, screen: &mut dyn Rasterizer) {
        draw_wireframe_model(screen, &self.model, self.position, self.angle, 1.0, Color::White);
    }
}

// --- Bullet ---
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub lifetime: f64, // Seconds alive so far
}

impl Bullet {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Bullet { position, velocity, lifetime: 0.0 }
    }

    pub fn update(&mut self, elapsed_time: f64, width: f64, height: f64) {
        self.position += self.velocity * elapsed_time;
        self.lifetime += elapsed_time;
        wrap_position(&mut self.position, width, height);
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime > BULLET_LIFETIME
    }

    pub fn draw(&self, screen: &mut dyn Rasterizer) {
        screen.draw_point(self.position, Color::Yellow);
    }
}
