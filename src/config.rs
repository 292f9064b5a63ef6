use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::constants::{DEFAULT_FPS, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};

#[derive(Parser, Debug, Clone)]
#[command(name = "wire-asteroids")]
#[command(about = "Wireframe asteroids in the terminal")]
pub struct GameConfig {
    /// Logical screen width the simulation runs in
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,
    /// Logical screen height the simulation runs in
    #[arg(long, default_value_t = DEFAULT_SCREEN_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
    /// Fixed random seed; omit to seed from the OS
    #[arg(long)]
    pub seed: Option<u64>,
    /// Target frames per second
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,
    /// Stop after this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,
    /// Run headless with scripted input, logging each frame instead of drawing it
    #[arg(long, default_value_t = false)]
    pub debug: bool,
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u16).range(1..))]
    pub debug_cols: u16,
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u16).range(1..))]
    pub debug_rows: u16,
    #[arg(long, default_value = "wire-asteroids.log")]
    pub log_file: PathBuf,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl GameConfig {
    pub fn frame_time(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        GameConfig::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = GameConfig::try_parse_from(["wire-asteroids"]).unwrap();
        assert_eq!((config.width, config.height), (256, 240));
        assert_eq!(config.fps, 60);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_frames, None);
        assert!(!config.debug);
        assert_eq!((config.debug_cols, config.debug_rows), (80, 24));
        assert_eq!(config.log_file, PathBuf::from("wire-asteroids.log"));
        assert_eq!(LevelFilter::from(config.log_level), LevelFilter::Info);
    }

    #[test]
    fn headless_run_options() {
        let config = GameConfig::try_parse_from([
            "wire-asteroids",
            "--debug",
            "--seed",
            "42",
            "--max-frames",
            "120",
            "--fps",
            "30",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_frames, Some(120));
        assert!((config.frame_time() - 1.0 / 30.0).abs() < 1e-12);
        assert_eq!(LevelFilter::from(config.log_level), LevelFilter::Debug);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(GameConfig::try_parse_from(["wire-asteroids", "--width", "0"]).is_err());
        assert!(GameConfig::try_parse_from(["wire-asteroids", "--fps", "0"]).is_err());
        assert!(GameConfig::try_parse_from(["wire-asteroids", "--debug-rows", "0"]).is_err());
    }
}
