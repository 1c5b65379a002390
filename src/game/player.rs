//! Player entity
//!
//! The single physics entity. One tick runs, in order:
//! intent -> integrate -> move X -> resolve X -> move Y -> resolve Y.

use macroquad::prelude::Vec2;
use serde::{Deserialize, Serialize};
use crate::input::{Action, HeldActions};
use crate::world::Grid;
use super::body::{Contacts, KinematicBody};
use super::collision::{resolve_horizontal, resolve_vertical};
use super::intent::{apply_intent, IntentSpeeds};
use super::physics::{integrate, PhysicsSettings};

/// Player configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Spawn point, top-left corner (pixels)
    pub spawn: (f32, f32),
    /// Sprite and collision box width (pixels)
    pub width: u32,
    /// Sprite and collision box height (pixels)
    pub height: u32,
    /// Horizontal speed while a direction is held (px/s)
    pub run_speed: f32,
    /// Initial upward speed of a jump (px/s)
    pub jump_speed: f32,
    pub physics: PhysicsSettings,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            spawn: (64.0, 64.0),
            width: 32,
            height: 32,
            run_speed: 300.0,  // 5 px per frame at 60 FPS
            jump_speed: 500.0, // Roughly a 4-5 tile jump at default gravity
            physics: PhysicsSettings::default(),
        }
    }
}

impl PlayerSettings {
    pub fn speeds(&self) -> IntentSpeeds {
        IntentSpeeds {
            run: self.run_speed,
            jump: self.jump_speed,
        }
    }
}

/// The player: a body plus its settings
#[derive(Debug, Clone)]
pub struct Player {
    pub body: KinematicBody,
    pub settings: PlayerSettings,
}

impl Player {
    pub fn spawn(settings: PlayerSettings) -> Self {
        let (x, y) = settings.spawn;
        Self {
            body: KinematicBody::new(Vec2::new(x, y), settings.width, settings.height),
            settings,
        }
    }

    /// Put the player back at the spawn point with fresh state
    pub fn respawn(&mut self) {
        *self = Self::spawn(self.settings);
    }

    /// Run one simulation tick
    pub fn tick<H: HeldActions + ?Sized>(
        &mut self,
        grid: &Grid,
        tile_size: u32,
        held: &H,
        pressed: &[Action],
        dt: f32,
    ) {
        let body = &mut self.body;

        apply_intent(body, held, pressed, self.settings.speeds());
        integrate(body, &self.settings.physics, dt);

        body.advance_x(dt);
        let horizontal = resolve_horizontal(body, grid, tile_size);

        body.advance_y(dt);
        let vertical = resolve_vertical(body, grid, tile_size);

        body.contacts = Contacts { horizontal, vertical };

        log::trace!(
            "tick dt={:.4} pos=({:.1},{:.1}) vel=({:.1},{:.1}) grounded={} air={:.3}",
            dt,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y,
            body.state.grounded,
            body.state.air_time
        );
    }
}
