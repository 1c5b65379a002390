//! Rendering
//!
//! Thin macroquad layer over the simulation: sprite atlas, follow camera
//! and draw calls. Nothing here feeds back into physics.

mod atlas;
mod camera;
mod draw;

pub use atlas::*;
pub use camera::Camera;
pub use draw::*;
