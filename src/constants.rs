// --- Simulation Constants ---
pub const SHIP_TURN_RATE: f64 = 5.0; // Radians per second
pub const SHIP_THRUST: f64 = 20.0; // Velocity gained per second of thrust
pub const SHIP_MODEL: [(f64, f64); 3] = [(0.0, -5.5), (-2.5, 2.5), (2.5, 2.5)];
pub const STARTING_LIVES: u32 = 3;

pub const BULLET_SPEED: f64 = 200.0;
pub const BULLET_LIFETIME: f64 = 2.0; // Seconds

pub const INITIAL_ASTEROIDS: usize = 4;
pub const MAX_ASTEROIDS: usize = 20;
pub const LARGE_ASTEROID_SIZE: u8 = 2;
pub const ASTEROID_BASE_SPEED: f64 = 30.0;
pub const ASTEROID_SPEED_PER_SIZE: f64 = 5.0;
pub const ASTEROID_MAX_SPIN: f64 = 0.5; // Radians per second, either direction
pub const ASTEROID_BASE_VERTICES: usize = 8;
pub const ASTEROID_VERTICES_PER_SIZE: usize = 2;
pub const ASTEROID_BASE_RADIUS: f64 = 10.0;
pub const ASTEROID_RADIUS_PER_SIZE: f64 = 5.0;
pub const ASTEROID_RADIUS_JITTER: f64 = 0.2; // +/- fraction of the nominal radius
pub const ASTEROID_SPLIT_COUNT: usize = 2;
pub const SCORE_PER_SIZE_STEP: u32 = 100; // Score = 100 * (3 - size)

// --- HUD Layout (logical pixels) ---
pub const HUD_X: i32 = 10;
pub const SCORE_Y: i32 = 10;
pub const LIVES_Y: i32 = 20;
pub const GAME_OVER_OFFSET_X: i32 = 40;

// --- Host Constants ---
pub const DEFAULT_SCREEN_WIDTH: u32 = 256;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 240;
pub const DEFAULT_FPS: u32 = 60;
pub const KEY_FIRST_REPEAT_WINDOW_MS: u64 = 700; // Held after a fresh press, covers the OS delay before autorepeat
pub const KEY_REPEAT_WINDOW_MS: u64 = 150; // Held after each autorepeat once repeating has started
pub const DEFAULT_HEADLESS_FRAMES: u64 = 600; // Headless runs need an end; ten seconds at 60 FPS
