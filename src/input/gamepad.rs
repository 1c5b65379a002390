//! Gamepad support
//!
//! Native: gilrs. WASM: no gamepad, every query reports released.

/// Gamepad buttons the runtime maps to actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    South,
    Start,
    Select,
    DPadLeft,
    DPadRight,
    DPadUp,
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button, Gilrs};
    use std::collections::HashSet;

    /// Left stick deflection past which it counts as a held direction
    const STICK_THRESHOLD: f32 = 0.5;

    pub struct Gamepad {
        gilrs: Option<Gilrs>,
        down: HashSet<PadButton>,
        last_down: HashSet<PadButton>,
        stick_x: f32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    log::warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self {
                gilrs,
                down: HashSet::new(),
                last_down: HashSet::new(),
                stick_x: 0.0,
            }
        }

        /// Refresh button state; call once per frame
        pub fn poll(&mut self) {
            self.last_down = std::mem::take(&mut self.down);
            self.stick_x = 0.0;

            let Some(gilrs) = self.gilrs.as_mut() else { return };
            while gilrs.next_event().is_some() {}

            let Some((_, gp)) = gilrs.gamepads().next() else { return };
            let mapping = [
                (Button::South, PadButton::South),
                (Button::Start, PadButton::Start),
                (Button::Select, PadButton::Select),
                (Button::DPadLeft, PadButton::DPadLeft),
                (Button::DPadRight, PadButton::DPadRight),
                (Button::DPadUp, PadButton::DPadUp),
            ];
            for (button, pad) in mapping {
                if gp.is_pressed(button) {
                    self.down.insert(pad);
                }
            }
            self.stick_x = gp.value(Axis::LeftStickX);
        }

        pub fn has_gamepad(&self) -> bool {
            self.gilrs
                .as_ref()
                .is_some_and(|g| g.gamepads().next().is_some())
        }

        pub fn is_down(&self, button: PadButton) -> bool {
            self.down.contains(&button)
        }

        pub fn is_pressed(&self, button: PadButton) -> bool {
            self.down.contains(&button) && !self.last_down.contains(&button)
        }

        pub fn stick_left(&self) -> bool {
            self.stick_x < -STICK_THRESHOLD
        }

        pub fn stick_right(&self) -> bool {
            self.stick_x > STICK_THRESHOLD
        }
    }
}

// ============================================================================
// WASM stub
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_down(&self, _button: PadButton) -> bool {
            false
        }

        pub fn is_pressed(&self, _button: PadButton) -> bool {
            false
        }

        pub fn stick_left(&self) -> bool {
            false
        }

        pub fn stick_right(&self) -> bool {
            false
        }
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

pub use platform::Gamepad;
