//! Input-to-Intent mapping
//!
//! Held left/right overwrite horizontal velocity (right is checked first,
//! so left wins when both are held). A jump press is honored only while
//! grounded.

use crate::input::{Action, HeldActions};
use super::body::KinematicBody;

/// Horizontal and jump speeds applied by intent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentSpeeds {
    /// Horizontal speed while a direction is held (px/s)
    pub run: f32,
    /// Upward speed at the start of a jump (px/s)
    pub jump: f32,
}

/// Apply this tick's input to the body. Returns true if a jump started.
pub fn apply_intent<H: HeldActions + ?Sized>(
    body: &mut KinematicBody,
    held: &H,
    pressed: &[Action],
    speeds: IntentSpeeds,
) -> bool {
    if held.is_held(Action::MoveRight) {
        body.velocity.x = speeds.run;
    }
    if held.is_held(Action::MoveLeft) {
        body.velocity.x = -speeds.run;
    }

    let mut jumped = false;
    for &action in pressed {
        if action == Action::Jump && body.state.grounded {
            body.state.air_time = 0.0;
            body.state.grounded = false;
            body.velocity.y = -speeds.jump;
            jumped = true;
        }
    }
    jumped
}
