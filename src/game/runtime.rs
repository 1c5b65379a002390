//! Game Runtime
//!
//! Owns the level grid and the player, and runs one tick per frame.
//! Drawing lives in `crate::render`; this module is pure simulation.

use crate::config::GameConfig;
use crate::input::{Action, InputSnapshot};
use crate::world::Grid;
use super::player::Player;

/// Running game session
pub struct GameState {
    /// Static level, read-only while playing
    pub grid: Grid,
    pub player: Player,
    /// Pixel size of one tile
    pub tile_size: u32,
    /// Longest dt the simulation accepts in one tick
    pub max_frame_dt: f32,
    /// Show collision candidates and player stats
    pub show_debug_overlay: bool,
    /// Ticks simulated since the session started
    pub tick_count: u64,
}

impl GameState {
    pub fn new(grid: Grid, config: &GameConfig) -> Self {
        Self {
            grid,
            player: Player::spawn(config.player),
            tile_size: config.tile_size,
            max_frame_dt: config.max_frame_dt,
            show_debug_overlay: false,
            tick_count: 0,
        }
    }

    /// Run one frame of game simulation.
    /// `frame_time` is the wall-clock frame duration in seconds.
    pub fn tick(&mut self, frame_time: f32, input: &InputSnapshot) {
        if input.was_pressed(Action::ToggleDebug) {
            self.show_debug_overlay = !self.show_debug_overlay;
        }
        if input.was_pressed(Action::Respawn) {
            log::info!("Respawning player");
            self.player.respawn();
        }

        let dt = frame_time.clamp(0.0, self.max_frame_dt);
        self.player
            .tick(&self.grid, self.tile_size, input, &input.pressed, dt);
        self.tick_count += 1;
    }
}
