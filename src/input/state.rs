//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad input once per frame and folds
//! both into an action snapshot for the simulation.

use macroquad::prelude::*;
use super::gamepad::PadButton;
use super::{Action, Gamepad, InputSnapshot};

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
        }
    }

    /// Sample this frame's input. Call exactly once per frame.
    pub fn poll(&mut self) -> InputSnapshot {
        self.gamepad.poll();

        let held = Action::ALL
            .iter()
            .copied()
            .filter(|&a| self.action_down(a))
            .collect();
        let pressed = Action::ALL
            .iter()
            .copied()
            .filter(|&a| self.action_pressed(a))
            .collect();

        InputSnapshot { held, pressed }
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            Action::MoveRight => is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            Action::Jump => {
                is_key_down(KeyCode::Space) || is_key_down(KeyCode::Up) || is_key_down(KeyCode::W)
            }
            Action::ToggleDebug => is_key_down(KeyCode::F3),
            Action::Respawn => is_key_down(KeyCode::R),
            Action::Quit => is_key_down(KeyCode::Escape),
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            Action::MoveRight => is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
            Action::Jump => {
                is_key_pressed(KeyCode::Space)
                    || is_key_pressed(KeyCode::Up)
                    || is_key_pressed(KeyCode::W)
            }
            Action::ToggleDebug => is_key_pressed(KeyCode::F3),
            Action::Respawn => is_key_pressed(KeyCode::R),
            Action::Quit => is_key_pressed(KeyCode::Escape),
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        match action {
            Action::MoveLeft => gp.is_down(PadButton::DPadLeft) || gp.stick_left(),
            Action::MoveRight => gp.is_down(PadButton::DPadRight) || gp.stick_right(),
            Action::Jump => gp.is_down(PadButton::South) || gp.is_down(PadButton::DPadUp),
            Action::ToggleDebug => gp.is_down(PadButton::Select),
            Action::Respawn => gp.is_down(PadButton::Start),
            Action::Quit => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        match action {
            Action::MoveLeft => gp.is_pressed(PadButton::DPadLeft),
            Action::MoveRight => gp.is_pressed(PadButton::DPadRight),
            Action::Jump => gp.is_pressed(PadButton::South) || gp.is_pressed(PadButton::DPadUp),
            Action::ToggleDebug => gp.is_pressed(PadButton::Select),
            Action::Respawn => gp.is_pressed(PadButton::Start),
            Action::Quit => false,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
