//! Collision Resolver
//!
//! Axis-separated resolution of the body against solid tiles. X is
//! resolved after moving on X, then Y after moving on Y.
//!
//! Broad phase samples the body's box at tile-sized steps plus its far
//! edge, which yields an over-approximated candidate set of at most
//! `(ceil(w/ts) + 1) * (ceil(h/ts) + 1)` tiles for any body size.
//! Candidates are visited row-major (sample row outer, sample column inner)
//! and the first solid one wins; other overlaps wait for the next tick.

use crate::world::{Grid, TileCoord};
use super::body::{AxisContacts, BodyRect, KinematicBody};

/// Velocities below this (px/s) on an axis count as no motion
pub const MOTION_EPSILON: f32 = 0.01;

/// Axis being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Offsets sampled along one extent: 0, ts, 2ts, ... below `extent`, then
/// the far edge. With `inset` the far edge is the last pixel inside the
/// box, so a box flush against a tile does not count as touching it.
fn sample_offsets(extent: i32, tile_size: i32, inset: bool) -> impl Iterator<Item = i32> {
    let far = if inset { (extent - 1).max(0) } else { extent };
    (0..extent)
        .step_by(tile_size.max(1) as usize)
        .chain(std::iter::once(far))
}

/// Tiles that may overlap the box, in resolution order.
/// The axis not being resolved is inset by one pixel.
pub fn candidate_tiles(rect: BodyRect, axis: Axis, tile_size: i32) -> Vec<TileCoord> {
    let mut tiles = Vec::new();

    for oy in sample_offsets(rect.h, tile_size, axis == Axis::Horizontal) {
        for ox in sample_offsets(rect.w, tile_size, axis == Axis::Vertical) {
            let tile = TileCoord::from_pixel(
                rect.x.saturating_add(ox),
                rect.y.saturating_add(oy),
                tile_size,
            );
            if !tiles.contains(&tile) {
                tiles.push(tile);
            }
        }
    }

    tiles
}

/// Resolve X penetration after the body moved on X
pub fn resolve_horizontal(body: &mut KinematicBody, grid: &Grid, tile_size: u32) -> AxisContacts {
    if body.velocity.x.abs() < MOTION_EPSILON {
        return AxisContacts::default();
    }

    let ts = tile_size as i32;
    let candidates = candidate_tiles(body.rect(), Axis::Horizontal, ts);
    let hit = candidates.iter().copied().find(|&t| grid.is_solid(t));

    if let Some(tile) = hit {
        if body.velocity.x > 0.0 {
            body.position.x = tile.left(ts).saturating_sub(body.width() as i32) as f32;
        } else {
            body.position.x = tile.left(ts).saturating_add(ts) as f32;
        }
        log::trace!("x-collision with {:?}, vx {:.1} -> 0", tile, body.velocity.x);
        body.velocity.x = 0.0;
    }

    AxisContacts { candidates, hit }
}

/// Resolve Y penetration after the body moved on Y, and recompute the
/// grounded flag: grounded only if this pass hit a tile while moving down.
pub fn resolve_vertical(body: &mut KinematicBody, grid: &Grid, tile_size: u32) -> AxisContacts {
    if body.velocity.y.abs() < MOTION_EPSILON {
        body.state.grounded = false;
        return AxisContacts::default();
    }

    let ts = tile_size as i32;
    let candidates = candidate_tiles(body.rect(), Axis::Vertical, ts);
    let hit = candidates.iter().copied().find(|&t| grid.is_solid(t));

    let mut landed = false;
    if let Some(tile) = hit {
        if body.velocity.y > 0.0 {
            body.position.y = tile.top(ts).saturating_sub(body.height() as i32) as f32;
            landed = true;
        } else {
            body.position.y = tile.top(ts).saturating_add(ts) as f32;
        }
        log::trace!("y-collision with {:?}, vy {:.1} -> 0", tile, body.velocity.y);
        body.velocity.y = 0.0;
    }
    body.state.grounded = landed;

    AxisContacts { candidates, hit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::Vec2;

    const TS: u32 = 32;

    fn grid(tiles: &[(i32, i32)]) -> Grid {
        Grid::from_tiles(tiles.iter().map(|&(x, y)| (TileCoord::new(x, y), 1)))
    }

    fn body_at(x: f32, y: f32) -> KinematicBody {
        KinematicBody::new(Vec2::new(x, y), TS, TS)
    }

    fn overlaps_solid(body: &KinematicBody, grid: &Grid) -> bool {
        let r = body.bounds();
        grid.iter().any(|(t, _)| {
            let (tx, ty) = ((t.x * TS as i32) as f32, (t.y * TS as i32) as f32);
            let eps = MOTION_EPSILON;
            r.x + eps < tx + TS as f32
                && tx + eps < r.x + r.w
                && r.y + eps < ty + TS as f32
                && ty + eps < r.y + r.h
        })
    }

    #[test]
    fn test_candidates_row_major_with_inset() {
        let rect = BodyRect { x: 10, y: 20, w: 32, h: 32 };

        // Vertical pass: x inset to the last pixel column, y sampled at the far edge
        let tiles = candidate_tiles(rect, Axis::Vertical, 32);
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 1),
            ]
        );

        // Flush on the non-resolved axis: no neighbour column sampled
        let flush = BodyRect { x: 32, y: 40, w: 32, h: 32 };
        let tiles = candidate_tiles(flush, Axis::Vertical, 32);
        assert_eq!(tiles, vec![TileCoord::new(1, 1), TileCoord::new(1, 2)]);
    }

    #[test]
    fn test_candidate_count_is_bounded() {
        let rect = BodyRect { x: 5, y: 7, w: 64, h: 96 };
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let tiles = candidate_tiles(rect, axis, 32);
            assert!(tiles.len() <= (64 / 32 + 1) * (96 / 32 + 1));
            assert!(!tiles.is_empty());
        }
    }

    #[test]
    fn test_small_body_candidates() {
        let rect = BodyRect { x: 0, y: 0, w: 16, h: 16 };
        let tiles = candidate_tiles(rect, Axis::Horizontal, 32);
        assert_eq!(tiles, vec![TileCoord::new(0, 0)]);
    }

    #[test]
    fn test_far_edge_sampled_for_odd_sizes() {
        // 48 px wide body at x = 20 covers columns 0..=2
        let rect = BodyRect { x: 20, y: 0, w: 48, h: 32 };
        let tiles = candidate_tiles(rect, Axis::Vertical, 32);
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(2, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 1),
                TileCoord::new(2, 1),
            ]
        );

        // 40 px tall body: row 1 holds its bottom edge
        let rect = BodyRect { x: 0, y: 0, w: 32, h: 40 };
        let tiles = candidate_tiles(rect, Axis::Vertical, 32);
        assert_eq!(tiles.last(), Some(&TileCoord::new(0, 1)));
    }

    #[test]
    fn test_candidates_saturate_near_i32_max() {
        let rect = BodyRect { x: i32::MAX - 10, y: i32::MAX, w: 32, h: 32 };
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let tiles = candidate_tiles(rect, axis, 32);
            assert!(!tiles.is_empty());
            assert!(tiles.iter().all(|t| t.y == i32::MAX / 32));
        }
    }

    #[test]
    fn test_land_on_tile_scenario() {
        // Floor tile at row 5 (top edge y = 160). Body bottom one pixel above.
        let g = grid(&[(0, 5)]);
        let mut body = body_at(0.0, 160.0 - 32.0 - 1.0);
        body.state.air_time = 0.05;

        let settings = crate::game::physics::PhysicsSettings {
            gravity: 5000.0,
            ..Default::default()
        };
        crate::game::physics::integrate(&mut body, &settings, 0.1);
        assert!((body.velocity.y - 25.0).abs() < 1e-3);

        body.advance_y(0.1);
        let contacts = resolve_vertical(&mut body, &g, TS);

        assert_eq!(contacts.hit, Some(TileCoord::new(0, 5)));
        assert_eq!(body.position.y, 128.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(body.is_grounded());
        assert!(!overlaps_solid(&body, &g));
    }

    #[test]
    fn test_ceiling_hit_does_not_ground() {
        let g = grid(&[(0, 0)]);
        let mut body = body_at(0.0, 30.0);
        body.state.grounded = true;
        body.velocity.y = -200.0;

        let contacts = resolve_vertical(&mut body, &g, TS);
        assert_eq!(contacts.hit, Some(TileCoord::new(0, 0)));
        assert_eq!(body.position.y, 32.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.is_grounded());
    }

    #[test]
    fn test_no_vertical_hit_clears_grounded() {
        let mut body = body_at(0.0, 0.0);
        body.state.grounded = true;
        body.velocity.y = 40.0;

        let contacts = resolve_vertical(&mut body, &Grid::empty(), TS);
        assert!(contacts.hit.is_none());
        assert!(!contacts.candidates.is_empty());
        assert!(!body.is_grounded());
        assert_eq!(body.velocity.y, 40.0);
    }

    #[test]
    fn test_stationary_skips_resolution() {
        // Overlapping a solid tile but not moving: nothing is corrected
        let g = grid(&[(0, 0)]);
        let mut body = body_at(5.0, 5.0);
        body.velocity = Vec2::new(0.005, -0.005);
        body.state.grounded = true;

        let x = resolve_horizontal(&mut body, &g, TS);
        let y = resolve_vertical(&mut body, &g, TS);
        assert!(x.candidates.is_empty() && x.hit.is_none());
        assert!(y.candidates.is_empty() && y.hit.is_none());
        assert_eq!(body.position, Vec2::new(5.0, 5.0));
        assert!(!body.is_grounded());
    }

    #[test]
    fn test_wall_on_right_clamps_right_edge() {
        let g = grid(&[(3, 0)]);
        let mut body = body_at(70.0, 0.0);
        body.velocity.x = 300.0;

        let contacts = resolve_horizontal(&mut body, &g, TS);
        assert_eq!(contacts.hit, Some(TileCoord::new(3, 0)));
        assert_eq!(body.position.x, 64.0);
        assert_eq!(body.velocity.x, 0.0);
        assert!(!overlaps_solid(&body, &g));
    }

    #[test]
    fn test_wall_on_left_clamps_left_edge() {
        let g = grid(&[(0, 1)]);
        let mut body = body_at(20.0, 32.0);
        body.velocity.x = -300.0;

        resolve_horizontal(&mut body, &g, TS);
        assert_eq!(body.position.x, 32.0);
        assert_eq!(body.velocity.x, 0.0);
        assert!(!overlaps_solid(&body, &g));
    }

    #[test]
    fn test_floor_is_ignored_by_horizontal_pass() {
        // Standing flush on a floor row while walking right
        let g = grid(&[(0, 1), (1, 1), (2, 1)]);
        let mut body = body_at(10.0, 0.0);
        body.velocity.x = 250.0;

        let contacts = resolve_horizontal(&mut body, &g, TS);
        assert!(contacts.hit.is_none());
        assert_eq!(body.position.x, 10.0);
        assert_eq!(body.velocity.x, 250.0);
    }

    #[test]
    fn test_first_hit_wins_in_row_major_order() {
        // Both sampled columns of the lower row are solid; the left one is
        // visited first and decides the landing.
        let g = Grid::from_tiles([(TileCoord::new(0, 1), 1), (TileCoord::new(1, 1), 2)]);
        let mut body = body_at(16.0, 4.0);
        body.velocity.y = 100.0;

        let contacts = resolve_vertical(&mut body, &g, TS);
        assert_eq!(contacts.hit, Some(TileCoord::new(0, 1)));
        assert_eq!(body.position.y, 0.0);
        assert!(body.is_grounded());
    }

    #[test]
    fn test_negative_coordinates() {
        let g = grid(&[(-2, -1)]);
        let mut body = body_at(-40.0, -60.0);
        body.velocity.y = 50.0;

        let contacts = resolve_vertical(&mut body, &g, TS);
        assert_eq!(contacts.hit, Some(TileCoord::new(-2, -1)));
        assert_eq!(body.position.y, -64.0);
        assert!(body.is_grounded());
    }

    #[test]
    fn test_subpixel_overlap_at_negative_x_truncates_toward_zero() {
        // Wall tile spans x in [-64, -32). The body is 0.5 px inside it, but
        // x = -32.5 truncates to -32, so no candidate reaches column -2.
        let g = grid(&[(-2, 0)]);
        let mut body = body_at(-32.5, 0.0);
        body.velocity.x = -30.0;

        let contacts = resolve_horizontal(&mut body, &g, TS);
        assert!(contacts.hit.is_none());
        assert_eq!(body.position.x, -32.5);

        // One more pixel of travel reaches the wall and snaps back flush
        body.position.x = -33.0;
        let contacts = resolve_horizontal(&mut body, &g, TS);
        assert_eq!(contacts.hit, Some(TileCoord::new(-2, 0)));
        assert_eq!(body.position.x, -32.0);
    }
}
