//! Game Module
//!
//! Simulation of the single player body against the tile grid:
//! - Body: box, velocity, grounded/airborne state
//! - Physics: friction and air-time gravity
//! - Collision: axis-separated resolution against solid tiles
//! - Intent: held/pressed input -> velocity and jumps
//! - Player / Runtime: tick ordering and session state

pub mod body;
pub mod collision;
pub mod intent;
pub mod physics;
pub mod player;
pub mod runtime;

// Re-export main types
pub use body::AxisContacts;
pub use physics::PhysicsSettingsError;
pub use player::PlayerSettings;
pub use runtime::GameState;
