//! World module - the static level
//!
//! - Sparse tile grid (coordinate -> tile code)
//! - CSV level loading with a fall-back-to-empty policy

mod grid;
mod level;

pub use grid::*;
pub use level::*;
