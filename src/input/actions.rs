//! Game action definitions

/// All logical actions the runtime reacts to
///
/// Keyboard / gamepad mappings:
/// - Left/Right or A/D, D-pad or left stick = move
/// - Space, Up or W, South button (A/Cross) = jump
/// - F3, Select = toggle debug overlay
/// - R, Start = respawn
/// - Escape = quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    ToggleDebug,
    Respawn,
    Quit,
}

impl Action {
    /// Fixed order in which key-down events are reported each frame
    pub const ALL: [Action; 6] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::ToggleDebug,
        Action::Respawn,
        Action::Quit,
    ];
}

/// Anything that can answer "is this action currently held?"
pub trait HeldActions {
    fn is_held(&self, action: Action) -> bool;
}

impl HeldActions for [Action] {
    fn is_held(&self, action: Action) -> bool {
        self.contains(&action)
    }
}

impl<const N: usize> HeldActions for [Action; N] {
    fn is_held(&self, action: Action) -> bool {
        self.contains(&action)
    }
}

/// Input for one tick: held actions plus the ordered key-down events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: Vec<Action>,
    pub pressed: Vec<Action>,
}

impl InputSnapshot {
    /// Was this action pressed down this tick?
    pub fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

impl HeldActions for InputSnapshot {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}
