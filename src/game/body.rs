//! Kinematic Body
//!
//! An axis-aligned box with velocity and grounded/airborne state.
//! Positions are pixels, y grows downward.

use macroquad::prelude::Vec2;
use crate::world::TileCoord;

/// Integer view of the body's box, used for all grid math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Grounded/airborne state owned by a body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsState {
    /// Resting on a solid tile (set by the last vertical pass)
    pub grounded: bool,
    /// Seconds spent airborne since the last jump
    pub air_time: f32,
    /// Vertical acceleration applied on the last tick (display only)
    pub vertical_acceleration: f32,
}

/// Candidate tiles and first hit of one axis pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisContacts {
    pub candidates: Vec<TileCoord>,
    pub hit: Option<TileCoord>,
}

/// Most recent contacts of both axis passes (debug overlay)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contacts {
    pub horizontal: AxisContacts,
    pub vertical: AxisContacts,
}

/// The player's physics body
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    /// Top-left corner (pixels)
    pub position: Vec2,
    /// Pixels per second
    pub velocity: Vec2,
    pub state: PhysicsState,
    pub contacts: Contacts,
    width: u32,
    height: u32,
}

impl KinematicBody {
    pub fn new(position: Vec2, width: u32, height: u32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            state: PhysicsState::default(),
            contacts: Contacts::default(),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    /// Position truncated toward zero, size as integers.
    ///
    /// Truncation (not floor) means a body up to one pixel past a tile edge
    /// on the negative side still maps to the tile it came from; the overlap
    /// is corrected once it grows to a full pixel. Saturates at the i32 range.
    pub fn rect(&self) -> BodyRect {
        BodyRect {
            x: self.position.x as i32,
            y: self.position.y as i32,
            w: self.width as i32,
            h: self.height as i32,
        }
    }

    /// Float bounds (x, y, w, h) for rendering and camera follow
    pub fn bounds(&self) -> macroquad::prelude::Rect {
        macroquad::prelude::Rect::new(
            self.position.x,
            self.position.y,
            self.width as f32,
            self.height as f32,
        )
    }

    /// Move along X by velocity * dt
    pub fn advance_x(&mut self, dt: f32) {
        self.position.x += self.velocity.x * dt;
    }

    /// Move along Y by velocity * dt
    pub fn advance_y(&mut self, dt: f32) {
        self.position.y += self.velocity.y * dt;
    }
}
