//! Keyboard state sampled once per frame.
//!
//! Window events only record key transitions here; the game loop turns them
//! into a [`TickInput`] snapshot at the start of each frame and then clears
//! the edges with [`InputState::end_frame`].

use std::collections::HashMap;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::sim::{PaddleInput, Player, TickInput};

/// State of a single key between two frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ButtonState {
    /// Whether the key is currently held down
    is_down: bool,
    /// Went down at least once since the last frame
    pressed: bool,
    /// Went up at least once since the last frame
    released: bool,
}

impl ButtonState {
    fn handle_event(&mut self, down: bool) {
        if down && !self.is_down {
            self.pressed = true;
        } else if !down && self.is_down {
            self.released = true;
        }
        self.is_down = down;
    }

    fn end_frame(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

/// Fixed key bindings for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleKeys {
    pub up: KeyCode,
    pub down: KeyCode,
}

/// Fixed key bindings for the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Indexed by `Player::index`
    pub paddles: [PaddleKeys; 2],
    pub launch: KeyCode,
    pub quit: KeyCode,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            paddles: [
                PaddleKeys {
                    up: KeyCode::KeyW,
                    down: KeyCode::KeyS,
                },
                PaddleKeys {
                    up: KeyCode::ArrowUp,
                    down: KeyCode::ArrowDown,
                },
            ],
            launch: KeyCode::Space,
            quit: KeyCode::Escape,
        }
    }
}

/// All keys seen so far
#[derive(Debug, Default)]
pub struct InputState {
    keys: HashMap<KeyCode, ButtonState>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a winit keyboard event; OS key repeats are ignored
    pub fn handle_event(&mut self, event: &KeyEvent) {
        if event.repeat {
            return;
        }
        if let PhysicalKey::Code(code) = event.physical_key {
            self.handle_key(code, event.state == ElementState::Pressed);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, down: bool) {
        self.keys.entry(code).or_default().handle_event(down);
    }

    fn state(&self, code: KeyCode) -> ButtonState {
        self.keys.get(&code).copied().unwrap_or_default()
    }

    pub fn held(&self, code: KeyCode) -> bool {
        self.state(code).is_down
    }

    /// Went down since the last frame
    pub fn pressed(&self, code: KeyCode) -> bool {
        self.state(code).pressed
    }

    /// Went up since the last frame
    pub fn released(&self, code: KeyCode) -> bool {
        self.state(code).released
    }

    /// Build the simulation input for this frame
    pub fn snapshot(&self, controls: &Controls) -> TickInput {
        let mut input = TickInput {
            launch: self.pressed(controls.launch),
            ..Default::default()
        };
        for player in Player::ALL {
            let keys = controls.paddles[player.index()];
            *input.paddle_mut(player) = PaddleInput {
                up_pressed: self.pressed(keys.up),
                up_released: self.released(keys.up),
                down_pressed: self.pressed(keys.down),
                down_released: self.released(keys.down),
            };
        }
        input
    }

    /// Forget this frame's transitions, keeping held keys
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            state.end_frame();
        }
    }
}
