//! Frame drawing
//!
//! Tiles, player sprite and the debug overlay, all through the follow camera.

use macroquad::prelude::*;
use crate::game::{AxisContacts, GameState};
use crate::world::TileCoord;
use super::{Camera, TileAtlas};

/// Flat tile colors used when no atlas texture is available
const FALLBACK_COLORS: [Color; 4] = [
    Color::new(0.45, 0.30, 0.20, 1.0),
    Color::new(0.35, 0.60, 0.30, 1.0),
    Color::new(0.55, 0.55, 0.60, 1.0),
    Color::new(0.70, 0.55, 0.25, 1.0),
];

const PLAYER_FALLBACK_COLOR: Color = Color::new(0.90, 0.25, 0.25, 1.0);

fn screen_size() -> Vec2 {
    vec2(screen_width(), screen_height())
}

fn draw_cell(atlas: &TileAtlas, source: Option<Rect>, dest: Rect, fallback: Color) {
    match (atlas.texture(), source) {
        (Some(texture), Some(source)) => draw_texture_ex(
            texture,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                source: Some(source),
                dest_size: Some(vec2(dest.w, dest.h)),
                ..Default::default()
            },
        ),
        _ => draw_rectangle(dest.x, dest.y, dest.w, dest.h, fallback),
    }
}

fn tile_rect(tile: TileCoord, tile_size: u32) -> Rect {
    let ts = tile_size as f32;
    Rect::new(tile.x as f32 * ts, tile.y as f32 * ts, ts, ts)
}

/// Draw the tiles visible through the camera
pub fn draw_level(game: &GameState, atlas: &TileAtlas, camera: &Camera) {
    let (min, max) = camera.visible_tiles(screen_size(), game.tile_size);

    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let tile = TileCoord::new(x, y);
            let code = game.grid.get(tile);
            if code == crate::world::EMPTY {
                continue;
            }
            let fallback = FALLBACK_COLORS[(code as usize - 1) % FALLBACK_COLORS.len()];
            let dest = camera.apply_rect(tile_rect(tile, game.tile_size));
            draw_cell(atlas, atlas.tile_source(code), dest, fallback);
        }
    }
}

/// Draw the player sprite
pub fn draw_player(game: &GameState, atlas: &TileAtlas, camera: &Camera) {
    let dest = camera.apply_rect(game.player.body.bounds());
    draw_cell(atlas, Some(atlas.player_source()), dest, PLAYER_FALLBACK_COLOR);
}

fn draw_contacts(contacts: &AxisContacts, tile_size: u32, camera: &Camera, color: Color) {
    for &tile in &contacts.candidates {
        let r = camera.apply_rect(tile_rect(tile, tile_size));
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, color);
    }
    if let Some(tile) = contacts.hit {
        let r = camera.apply_rect(tile_rect(tile, tile_size));
        draw_rectangle(r.x, r.y, r.w, r.h, Color::new(1.0, 0.1, 0.1, 0.35));
    }
}

/// Collision candidates, player box and a stats panel
pub fn draw_debug_overlay(game: &GameState, camera: &Camera, has_gamepad: bool) {
    let body = &game.player.body;

    draw_contacts(&body.contacts.horizontal, game.tile_size, camera, YELLOW);
    draw_contacts(&body.contacts.vertical, game.tile_size, camera, SKYBLUE);

    let r = camera.apply_rect(body.bounds());
    let outline = if body.is_grounded() { GREEN } else { ORANGE };
    draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, outline);

    let lines = [
        format!("FPS {}  tick {}", get_fps(), game.tick_count),
        format!("pos ({:.1}, {:.1})", body.position.x, body.position.y),
        format!("vel ({:.1}, {:.1})", body.velocity.x, body.velocity.y),
        format!(
            "grounded {}  air {:.2}s  accel {:.0}",
            if body.is_grounded() { "Y" } else { "N" },
            body.state.air_time,
            body.state.vertical_acceleration
        ),
        format!(
            "candidates x:{} y:{}",
            body.contacts.horizontal.candidates.len(),
            body.contacts.vertical.candidates.len()
        ),
        format!("tiles {}  gamepad {}", game.grid.len(), if has_gamepad { "Y" } else { "N" }),
    ];

    let panel_h = 8.0 + lines.len() as f32 * 16.0;
    draw_rectangle(4.0, 4.0, 260.0, panel_h, Color::from_rgba(20, 22, 28, 200));
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 20.0 + i as f32 * 16.0, 16.0, WHITE);
    }
}
