use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::constants::*;
use crate::entities::{Asteroid, Bullet, Ship};
use crate::rendering::{Color, Rasterizer};
use crate::spawner::{spawn_asteroid, spawn_random_asteroid};
use crate::terminal_io::{Control, InputSource};
use crate::types::Vector2D;

/// Lifecycle hooks a host frame driver calls.
pub trait FrameHandler {
    /// Called once before the first frame. Returns false to abort start-up.
    fn initialize(&mut self) -> bool;

    /// Advances one frame and draws it. Returns false to ask the host to stop.
    fn update(&mut self, elapsed_time: f64, input: &dyn InputSource, screen: &mut dyn Rasterizer) -> bool;
}

pub struct Simulation {
    width: f64,
    height: f64,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    bullets: Vec<Bullet>,
    score: u32,
    lives: u32,
    game_over: bool,
    rng: StdRng,
}

impl Simulation {
    /// A simulation seeded from OS entropy. A zero-sized screen is accepted;
    /// everything then spawns and wraps onto the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Simulation::with_rng(width, height, StdRng::from_entropy())
    }

    pub fn with_seed(width: u32, height: u32, seed: u64) -> Self {
        Simulation::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, rng: StdRng) -> Self {
        let (width, height) = (f64::from(width), f64::from(height));
        Simulation {
            width,
            height,
            ship: Ship::new(width / 2.0, height / 2.0),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            game_over: false,
            rng,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn centre(&self) -> Vector2D {
        Vector2D::new(self.width / 2.0, self.height / 2.0)
    }

    /// Adds a large asteroid at a random spot, subject to the cap.
    pub fn spawn_asteroid(&mut self) {
        spawn_random_asteroid(&mut self.rng, self.width, self.height, &mut self.asteroids);
    }

    pub fn handle_input(&mut self, elapsed_time: f64, input: &dyn InputSource) {
        if input.is_held(Control::RotateLeft) {
            self.ship.rotate(-1.0, elapsed_time);
        }
        if input.is_held(Control::RotateRight) {
            self.ship.rotate(1.0, elapsed_time);
        }
        if input.is_held(Control::Thrust) {
            self.ship.thrust(elapsed_time);
        }
        if input.is_pressed(Control::Fire) {
            self.bullets.push(self.ship.fire());
        }
    }

    pub fn update_game_objects(&mut self, elapsed_time: f64) {
        let (width, height) = (self.width, self.height);
        self.ship.update(elapsed_time, width, height);
        for asteroid in &mut self.asteroids {
            asteroid.update(elapsed_time, width, height);
        }
        for bullet in &mut self.bullets {
            bullet.update(elapsed_time, width, height);
        }
        self.bullets.retain(|bullet| !bullet.is_expired());
    }

    pub fn check_collisions(&mut self) {
        let asteroids = &mut self.asteroids;
        let rng = &mut self.rng;
        let score = &mut self.score;
        // children wait here until every bullet has been tested
        let mut new_asteroids: Vec<Asteroid> = Vec::new();

        self.bullets.retain(|bullet| {
            let Some(hit) = asteroids.iter().position(|asteroid| asteroid.contains(bullet.position)) else {
                return true;
            };

            let room = asteroids.len() + new_asteroids.len() < MAX_ASTEROIDS;
            let destroyed = asteroids.remove(hit);
            *score += destroyed.score();
            info!(
                "Size {} asteroid destroyed at ({:.1}, {:.1}), +{} points",
                destroyed.size,
                destroyed.position.x,
                destroyed.position.y,
                destroyed.score()
            );

            if let Some(child_size) = destroyed.split_size() {
                if room {
                    for _ in 0..ASTEROID_SPLIT_COUNT {
                        spawn_asteroid(rng, destroyed.position, child_size, &mut new_asteroids);
                    }
                } else {
                    debug!("Asteroid cap reached, split dropped");
                }
            }
            false
        });
        asteroids.append(&mut new_asteroids);

        let ship_position = self.ship.position;
        if self.asteroids.iter().any(|asteroid| asteroid.contains(ship_position)) {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.game_over = true;
                info!("Ship destroyed, game over. Final score: {}", self.score);
            } else {
                info!("Ship destroyed, {} lives left", self.lives);
                let centre = self.centre();
                self.ship.reset(centre);
            }
        }
    }

    pub fn draw_game(&self, screen: &mut dyn Rasterizer) {
        screen.clear_screen(Color::Black);

        self.ship.draw(screen);
        for asteroid in &self.asteroids {
            asteroid.draw(screen);
        }
        for bullet in &self.bullets {
            bullet.draw(screen);
        }

        screen.draw_text(HUD_X, SCORE_Y, &format!("SCORE: {}", self.score), Color::White);
        screen.draw_text(HUD_X, LIVES_Y, &format!("LIVES: {}", self.lives), Color::White);

        if self.game_over {
            let x = (screen.screen_width() / 2) as i32 - GAME_OVER_OFFSET_X;
            let y = (screen.screen_height() / 2) as i32;
            screen.draw_text(x, y, "GAME OVER", Color::White);
        }
    }
}

impl FrameHandler for Simulation {
    fn initialize(&mut self) -> bool {
        self.ship = Ship::new(self.width / 2.0, self.height / 2.0);
        for _ in 0..INITIAL_ASTEROIDS {
            self.spawn_asteroid();
        }
        debug!("Initialized with {} asteroids", self.asteroids.len());
        true
    }

    fn update(&mut self, elapsed_time: f64, input: &dyn InputSource, screen: &mut dyn Rasterizer) -> bool {
        if !self.game_over {
            self.handle_input(elapsed_time, input);
            self.update_game_objects(elapsed_time);
            self.check_collisions();
        }
        self.draw_game(screen);
        true
    }
}
