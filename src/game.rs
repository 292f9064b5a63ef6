use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use log::{error, info, warn};

use crate::config::GameConfig;
use crate::constants::DEFAULT_HEADLESS_FRAMES;
use crate::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use crate::simulation::FrameHandler;
use crate::terminal_io::{HostEvent, KeyboardInput, SimulatedInput};

/// Hosts a `FrameHandler`: owns the terminal, paces frames and feeds input.
pub struct Game {
    config: GameConfig,
    stdout_target: OutputTarget,
    game_grid: GameGrid,
    simulated_input: Option<SimulatedInput>,
    keyboard_enhanced: bool,
}

impl Game {
    pub fn new(config: GameConfig, simulated_input: Option<SimulatedInput>) -> io::Result<Self> {
        let (cols, rows, stdout_target) = if config.debug {
            info!("Headless resolution set to {}x{}", config.debug_cols, config.debug_rows);
            let buffer = ScreenBuffer::new(config.debug_cols, config.debug_rows);
            (config.debug_cols, config.debug_rows, OutputTarget::ScreenBuffer(buffer))
        } else {
            let (cols, rows) = terminal::size().map_err(|e| {
                error!("Failed to get terminal size: {}", e);
                e
            })?;
            info!("Terminal size: {}x{}", cols, rows);
            (cols, rows, OutputTarget::Stdout(io::stdout()))
        };

        Ok(Game {
            game_grid: GameGrid::new(config.width, config.height, cols, rows),
            config,
            stdout_target,
            simulated_input,
            keyboard_enhanced: false,
        })
    }

    /// Runs frames until the handler or the player asks to stop, or the frame
    /// limit is reached. The terminal is restored even when a frame fails.
    pub fn run(&mut self, handler: &mut impl FrameHandler) -> io::Result<()> {
        if !handler.initialize() {
            warn!("Initialization declined, not starting the frame loop.");
            return Ok(());
        }

        if self.config.debug {
            return self.run_headless(handler);
        }

        self.enter_terminal()?;
        let result = self.run_interactive(handler);
        let restored = self.leave_terminal();
        result.and(restored)
    }

    fn run_interactive(&mut self, handler: &mut impl FrameHandler) -> io::Result<()> {
        let frame_budget = Duration::from_secs_f64(self.config.frame_time());
        let mut keyboard = KeyboardInput::new();
        let mut last_frame = Instant::now();
        let mut frame_count: u64 = 0;

        while self.config.max_frames.is_none_or(|max| frame_count < max) {
            let mut quit = false;
            for host_event in keyboard.poll(frame_budget.saturating_sub(last_frame.elapsed()))? {
                match host_event {
                    HostEvent::Quit => quit = true,
                    HostEvent::Resize(cols, rows) => {
                        info!("Terminal resized to {}x{}", cols, rows);
                        self.game_grid.resize(cols, rows);
                        self.stdout_target.execute_other_command(Clear(ClearType::All))?;
                    }
                }
            }
            if quit {
                info!("Leaving frame loop after {} frames.", frame_count);
                break;
            }

            let now = Instant::now();
            let elapsed_time = now.duration_since(last_frame).as_secs_f64();
            last_frame = now;

            if !handler.update(elapsed_time, &keyboard, &mut self.game_grid) {
                info!("Frame handler asked to stop.");
                break;
            }
            self.game_grid.render(&mut self.stdout_target).map_err(|e| {
                error!("Failed to draw frame {}: {}", frame_count, e);
                e
            })?;
            frame_count += 1;
        }
        Ok(())
    }

    fn run_headless(&mut self, handler: &mut impl FrameHandler) -> io::Result<()> {
        let elapsed_time = self.config.frame_time();
        let max_frames = self.config.max_frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
        let mut input = self
            .simulated_input
            .take()
            .unwrap_or_else(|| SimulatedInput::new(HashMap::new()));

        for frame_count in 0..max_frames {
            let controls = input.poll(frame_count);
            if !handler.update(elapsed_time, &controls, &mut self.game_grid) {
                info!("Frame handler asked to stop.");
                break;
            }
            if let OutputTarget::ScreenBuffer(ref mut sb) = self.stdout_target {
                sb.clear();
            }
            self.game_grid.render(&mut self.stdout_target)?;
            if let OutputTarget::ScreenBuffer(ref sb) = self.stdout_target {
                sb.print_to_log(frame_count);
            }
        }
        info!("Headless run finished.");
        Ok(())
    }

    fn enter_terminal(&mut self) -> io::Result<()> {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| {
            error!("Failed to enable raw mode: {}", e);
            e
        })?;
        self.stdout_target.execute_other_command(EnterAlternateScreen)?;
        self.stdout_target.execute_other_command(Hide).map_err(|e| {
            error!("Failed to hide cursor: {}", e);
            e
        })?;

        // release events make held keys exact; without them the hold window applies
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            self.stdout_target.execute_other_command(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            self.keyboard_enhanced = true;
            info!("Keyboard enhancement enabled, key releases are reported.");
        }
        Ok(())
    }

    fn leave_terminal(&mut self) -> io::Result<()> {
        if self.keyboard_enhanced {
            self.stdout_target.execute_other_command(PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        self.stdout_target.execute_other_command(Show)?;
        self.stdout_target.execute_other_command(LeaveAlternateScreen)?;
        disable_raw_mode().map_err(|e| {
            error!("Failed to disable raw mode: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::Rasterizer;
    use crate::terminal_io::{Control, ControlState, InputSource};
    use clap::Parser;

    /// Counts calls and remembers whether fire was seen pressed.
    struct CountingHandler {
        initialized: bool,
        frames: u64,
        fired_on: Vec<u64>,
        stop_after: Option<u64>,
    }

    impl CountingHandler {
        fn new(stop_after: Option<u64>) -> Self {
            CountingHandler { initialized: false, frames: 0, fired_on: Vec::new(), stop_after }
        }
    }

    impl FrameHandler for CountingHandler {
        fn initialize(&mut self) -> bool {
            self.initialized = true;
            true
        }

        fn update(&mut self, elapsed_time: f64, input: &dyn InputSource, screen: &mut dyn Rasterizer) -> bool {
            assert!((elapsed_time - 1.0 / 60.0).abs() < 1e-12);
            if input.is_pressed(Control::Fire) {
                self.fired_on.push(self.frames);
            }
            screen.draw_text(0, 0, "X", crate::rendering::Color::White);
            self.frames += 1;
            self.stop_after.is_none_or(|stop| self.frames < stop)
        }
    }

    fn headless_config(extra: &[&str]) -> GameConfig {
        let mut args = vec!["wire-asteroids", "--debug", "--debug-cols", "16", "--debug-rows", "4"];
        args.extend_from_slice(extra);
        GameConfig::parse_from(args)
    }

    #[test]
    fn headless_run_stops_at_frame_limit() {
        let mut game = Game::new(headless_config(&["--max-frames", "25"]), None).unwrap();
        let mut handler = CountingHandler::new(None);
        game.run(&mut handler).unwrap();
        assert!(handler.initialized);
        assert_eq!(handler.frames, 25);
    }

    #[test]
    fn headless_run_defaults_to_a_bounded_length() {
        let mut game = Game::new(headless_config(&[]), None).unwrap();
        let mut handler = CountingHandler::new(None);
        game.run(&mut handler).unwrap();
        assert_eq!(handler.frames, DEFAULT_HEADLESS_FRAMES);
    }

    #[test]
    fn headless_run_feeds_scripted_input() {
        let mut frames = HashMap::new();
        frames.insert(3, ControlState::new().press(Control::Fire));
        frames.insert(7, ControlState::new().press(Control::Fire));
        let script = SimulatedInput::new(frames);
        let mut game = Game::new(headless_config(&["--max-frames", "10"]), Some(script)).unwrap();
        let mut handler = CountingHandler::new(None);
        game.run(&mut handler).unwrap();
        assert_eq!(handler.fired_on, vec![3, 7]);
    }

    #[test]
    fn handler_can_stop_the_loop() {
        let mut game = Game::new(headless_config(&["--max-frames", "100"]), None).unwrap();
        let mut handler = CountingHandler::new(Some(4));
        game.run(&mut handler).unwrap();
        assert_eq!(handler.frames, 4);
    }

    #[test]
    fn headless_frames_land_in_the_screen_buffer() {
        let mut game = Game::new(headless_config(&["--max-frames", "1"]), None).unwrap();
        let mut handler = CountingHandler::new(None);
        game.run(&mut handler).unwrap();
        let OutputTarget::ScreenBuffer(ref sb) = game.stdout_target else {
            panic!("headless runs draw into a screen buffer");
        };
        assert_eq!(sb.rows()[0], format!("X{}", " ".repeat(15)));
    }
}
