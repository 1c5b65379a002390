//! 2D follow camera
//!
//! A pixel offset added to world positions before drawing.

use macroquad::prelude::{Rect, Vec2};
use crate::world::TileCoord;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    pub fn new(offset: Vec2) -> Self {
        Self { offset }
    }

    /// Center the target rect on screen
    pub fn follow(&mut self, target: Rect, screen_size: Vec2) {
        self.offset = Vec2::new(
            -target.x + (screen_size.x / 2.0 - target.w / 2.0),
            -target.y + (screen_size.y / 2.0 - target.h / 2.0),
        );
    }

    /// World point -> screen point
    pub fn apply(&self, point: Vec2) -> Vec2 {
        point + self.offset
    }

    /// World rect -> screen rect
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        let top_left = self.apply(rect.point());
        Rect::new(top_left.x, top_left.y, rect.w, rect.h)
    }

    /// Inclusive range of tiles that intersect the screen
    pub fn visible_tiles(&self, screen_size: Vec2, tile_size: u32) -> (TileCoord, TileCoord) {
        let ts = tile_size as f32;
        let left = -self.offset.x;
        let top = -self.offset.y;
        let min = TileCoord::new((left / ts).floor() as i32, (top / ts).floor() as i32);
        let max = TileCoord::new(
            ((left + screen_size.x) / ts).floor() as i32,
            ((top + screen_size.y) / ts).floor() as i32,
        );
        (min, max)
    }
}
