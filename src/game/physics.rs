//! Physics Integrator
//!
//! Advances a body's velocity once per tick:
//! 1. Horizontal friction decay, with a dead-zone snap to zero
//! 2. Gravity that grows with time spent airborne
//! 3. Air time accumulation while not grounded
//!
//! Gravity is `gravity * air_time`, so falls start floaty and get heavy.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::body::KinematicBody;

/// Horizontal speeds below this (px/s) snap to zero after friction
pub const HORIZONTAL_DEAD_ZONE: f32 = 100.0;

/// How friction is applied each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum FrictionDecay {
    /// `vx /= divisor` once per tick, regardless of dt (frame-rate dependent)
    #[default]
    PerTick,
    /// `vx /= divisor^(dt / reference_dt)`: the same slowdown per second at
    /// any frame rate, matching `PerTick` when dt equals `reference_dt`
    Scaled { reference_dt: f32 },
}

/// Tunable physics for one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Horizontal velocity is divided by this every tick (must be > 1)
    pub friction_divisor: f32,
    /// Scales air time into downward acceleration (px/s^2 per second airborne)
    pub gravity: f32,
    /// Maximum downward speed (px/s), only applied when enforced
    pub terminal_velocity: f32,
    /// Clamp falling speed to `terminal_velocity`
    pub enforce_terminal_velocity: bool,
    pub friction_decay: FrictionDecay,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            friction_divisor: 1.2,
            gravity: 5000.0,
            terminal_velocity: 1000.0,
            enforce_terminal_velocity: false,
            friction_decay: FrictionDecay::PerTick,
        }
    }
}

/// Rejected physics configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsSettingsError {
    #[error("friction_divisor must be a finite number greater than 1 (got {0})")]
    FrictionDivisor(f32),
    #[error("{field} must be finite and non-negative (got {value})")]
    OutOfRange { field: &'static str, value: f32 },
}

impl PhysicsSettings {
    /// Check the invariants the integrator relies on
    pub fn validate(&self) -> Result<(), PhysicsSettingsError> {
        if !self.friction_divisor.is_finite() || self.friction_divisor <= 1.0 {
            return Err(PhysicsSettingsError::FrictionDivisor(self.friction_divisor));
        }
        let check = |field: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(PhysicsSettingsError::OutOfRange { field, value })
            }
        };
        check("gravity", self.gravity)?;
        check("terminal_velocity", self.terminal_velocity)?;
        if let FrictionDecay::Scaled { reference_dt } = self.friction_decay {
            check("reference_dt", reference_dt)?;
            if reference_dt == 0.0 {
                return Err(PhysicsSettingsError::OutOfRange {
                    field: "reference_dt",
                    value: reference_dt,
                });
            }
        }
        Ok(())
    }

    fn friction_factor(&self, dt: f32) -> f32 {
        match self.friction_decay {
            FrictionDecay::PerTick => self.friction_divisor,
            FrictionDecay::Scaled { reference_dt } => {
                self.friction_divisor.powf(dt / reference_dt)
            }
        }
    }
}

/// Apply one tick of friction, gravity and air time to a body
pub fn integrate(body: &mut KinematicBody, settings: &PhysicsSettings, dt: f32) {
    // Friction
    body.velocity.x /= settings.friction_factor(dt);
    if body.velocity.x.abs() < HORIZONTAL_DEAD_ZONE {
        body.velocity.x = 0.0;
    }

    // Gravity
    let acceleration = settings.gravity * body.state.air_time;
    body.state.vertical_acceleration = acceleration;
    body.velocity.y += acceleration * dt;
    if settings.enforce_terminal_velocity {
        body.velocity.y = body.velocity.y.min(settings.terminal_velocity);
    }

    if !body.state.grounded {
        body.state.air_time += dt;
    }
}
