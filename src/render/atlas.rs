//! Sprite Atlas
//!
//! A single PNG holding tile-sized cells. Tile codes map to cells through a
//! keymap owned here, separate from the level grid.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use image::{imageops::FilterType, RgbaImage};
use macroquad::prelude::*;
use thiserror::Error;
use crate::config::AtlasConfig;

/// Error type for atlas loading
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to read atlas {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode atlas {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("atlas {} is too large after scaling ({width}x{height})", path.display())]
    TooLarge { path: PathBuf, width: u32, height: u32 },
}

/// Tile code and player -> atlas cell lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasKeymap {
    tiles: BTreeMap<i32, (u32, u32)>,
    player: (u32, u32),
}

impl AtlasKeymap {
    pub fn new(tiles: BTreeMap<i32, (u32, u32)>, player: (u32, u32)) -> Self {
        Self { tiles, player }
    }

    fn cell_rect((col, row): (u32, u32), cell_size: f32) -> Rect {
        Rect::new(col as f32 * cell_size, row as f32 * cell_size, cell_size, cell_size)
    }

    /// Source rect of a tile code, if the keymap knows it
    pub fn tile_source(&self, code: i32, cell_size: f32) -> Option<Rect> {
        self.tiles.get(&code).map(|&cell| Self::cell_rect(cell, cell_size))
    }

    /// Source rect of the player sprite
    pub fn player_source(&self, cell_size: f32) -> Rect {
        Self::cell_rect(self.player, cell_size)
    }
}

/// Decode the atlas PNG and scale it (nearest neighbour keeps pixel art sharp)
pub fn load_atlas_image(path: &Path, scale: f32) -> Result<RgbaImage, AtlasError> {
    let bytes = fs::read(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&bytes)
        .map_err(|source| AtlasError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let width = ((img.width() as f32 * scale).round() as u32).max(1);
    let height = ((img.height() as f32 * scale).round() as u32).max(1);
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(AtlasError::TooLarge {
            path: path.to_path_buf(),
            width,
            height,
        });
    }
    if (width, height) == img.dimensions() {
        return Ok(img);
    }
    Ok(image::imageops::resize(&img, width, height, FilterType::Nearest))
}

/// GPU atlas plus keymap. Without a texture, drawing falls back to flat colors.
pub struct TileAtlas {
    texture: Option<Texture2D>,
    keymap: AtlasKeymap,
    cell_size: f32,
}

impl TileAtlas {
    /// Load and upload the atlas. Needs a live macroquad context.
    pub fn load(config: &AtlasConfig, tile_size: u32) -> Self {
        let texture = match load_atlas_image(&config.path, config.scale) {
            Ok(img) => {
                let tex = Texture2D::from_rgba8(img.width() as u16, img.height() as u16, img.as_raw());
                tex.set_filter(FilterMode::Nearest);
                log::info!(
                    "Loaded atlas {} ({}x{})",
                    config.path.display(),
                    img.width(),
                    img.height()
                );
                Some(tex)
            }
            Err(e) => {
                log::warn!("{}, drawing flat tiles", e);
                None
            }
        };

        Self {
            texture,
            keymap: AtlasKeymap::new(config.tiles.clone(), config.player),
            cell_size: tile_size as f32,
        }
    }

    pub fn texture(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    pub fn tile_source(&self, code: i32) -> Option<Rect> {
        self.keymap.tile_source(code, self.cell_size)
    }

    pub fn player_source(&self) -> Rect {
        self.keymap.player_source(self.cell_size)
    }
}
