use std::collections::{HashMap, HashSet};
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info};

use crate::constants::{KEY_FIRST_REPEAT_WINDOW_MS, KEY_REPEAT_WINDOW_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

impl Control {
    fn from_key(code: KeyCode) -> Option<Control> {
        match code {
            KeyCode::Left | KeyCode::Char('a') => Some(Control::RotateLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(Control::RotateRight),
            KeyCode::Up | KeyCode::Char('w') => Some(Control::Thrust),
            KeyCode::Char(' ') => Some(Control::Fire),
            _ => None,
        }
    }
}

/// Per-frame view of the player's controls.
pub trait InputSource {
    /// The control is down this frame.
    fn is_held(&self, control: Control) -> bool;
    /// The control went down this frame.
    fn is_pressed(&self, control: Control) -> bool;
}

/// A fixed snapshot of control state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlState {
    held: HashSet<Control>,
    pressed: HashSet<Control>,
}

impl ControlState {
    pub fn new() -> Self {
        ControlState::default()
    }

    pub fn hold(mut self, control: Control) -> Self {
        self.held.insert(control);
        self
    }

    /// A fresh press also counts as held.
    pub fn press(mut self, control: Control) -> Self {
        self.held.insert(control);
        self.pressed.insert(control);
        self
    }
}

impl InputSource for ControlState {
    fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    fn is_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }
}

/// What the terminal asked of the host rather than of the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Quit,
    Resize(u16, u16),
}

/// When a key was last reported down, and whether autorepeat has kicked in.
#[derive(Clone, Copy, Debug)]
struct KeyDown {
    seen: Instant,
    repeating: bool,
}

// --- KeyboardInput: crossterm events turned into held/pressed state ---
pub struct KeyboardInput {
    last_seen: HashMap<Control, KeyDown>,
    pressed: HashSet<Control>,
    first_repeat_window: Duration,
    repeat_window: Duration,
    frame_time: Instant,
}

impl KeyboardInput {
    pub fn new() -> Self {
        KeyboardInput {
            last_seen: HashMap::new(),
            pressed: HashSet::new(),
            first_repeat_window: Duration::from_millis(KEY_FIRST_REPEAT_WINDOW_MS),
            repeat_window: Duration::from_millis(KEY_REPEAT_WINDOW_MS),
            frame_time: Instant::now(),
        }
    }

    /// Reads terminal events until `budget` runs out and returns the ones the
    /// host has to act on. Waiting out the budget also paces the frame loop.
    pub fn poll(&mut self, budget: Duration) -> io::Result<Vec<HostEvent>> {
        self.pressed.clear();
        let deadline = Instant::now() + budget;
        let mut host_events = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining).map_err(|e| {
                error!("Failed to poll event: {}", e);
                e
            })? {
                break;
            }
            let event = event::read().map_err(|e| {
                error!("Failed to read event: {}", e);
                e
            })?;
            if let Some(host_event) = self.handle_event(&event, Instant::now()) {
                host_events.push(host_event);
            }
        }
        self.frame_time = Instant::now();
        Ok(host_events)
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Option<HostEvent> {
        match event {
            Event::Key(key_event) => self.handle_key(key_event, now),
            Event::Resize(cols, rows) => Some(HostEvent::Resize(*cols, *rows)),
            _ => None,
        }
    }

    fn handle_key(&mut self, key_event: &KeyEvent, now: Instant) -> Option<HostEvent> {
        let is_quit = matches!(key_event.code, KeyCode::Char('q') | KeyCode::Esc)
            || (key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL));
        if is_quit && key_event.kind == KeyEventKind::Press {
            info!("Quit requested from keyboard.");
            return Some(HostEvent::Quit);
        }

        let control = Control::from_key(key_event.code)?;
        match key_event.kind {
            KeyEventKind::Press => {
                // terminals without release events resend Press while a key is
                // held, so a press only counts as new once the hold has lapsed
                let repeating = self.held_at(control, now);
                if !repeating {
                    debug!("{:?} pressed", control);
                    self.pressed.insert(control);
                }
                self.last_seen.insert(control, KeyDown { seen: now, repeating });
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(control, KeyDown { seen: now, repeating: true });
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&control);
            }
        }
        None
    }

    /// A key stays held through the autorepeat delay after a fresh press, and
    /// for a shorter window after each repeat once those start arriving.
    pub fn held_at(&self, control: Control, now: Instant) -> bool {
        self.last_seen.get(&control).is_some_and(|down| {
            let window = if down.repeating { self.repeat_window } else { self.first_repeat_window };
            now.saturating_duration_since(down.seen) <= window
        })
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        KeyboardInput::new()
    }
}

impl InputSource for KeyboardInput {
    fn is_held(&self, control: Control) -> bool {
        self.held_at(control, self.frame_time)
    }

    fn is_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }
}

// --- SimulatedInput for headless runs ---
pub struct SimulatedInput {
    frames: HashMap<u64, ControlState>,
}

impl SimulatedInput {
    pub fn new(frames: HashMap<u64, ControlState>) -> Self {
        SimulatedInput { frames }
    }

    /// Control state scripted for `frame_count`, or nothing held.
    pub fn poll(&mut self, frame_count: u64) -> ControlState {
        self.frames.remove(&frame_count).unwrap_or_default()
    }
}
