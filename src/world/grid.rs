//! Tile Grid
//!
//! Sparse mapping from integer tile coordinates to tile codes.
//! Code 0 is air; any positive code is solid. Coordinates that were never
//! loaded read as air, so the grid behaves as if it were infinite.

use std::collections::HashMap;
use thiserror::Error;

/// Tile code for empty space
pub const EMPTY: i32 = 0;

/// Integer tile coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing the given pixel (floor division, so negative pixels
    /// land in negative tiles)
    pub fn from_pixel(px: i32, py: i32, tile_size: i32) -> Self {
        Self {
            x: px.div_euclid(tile_size),
            y: py.div_euclid(tile_size),
        }
    }

    /// Left edge in pixels (saturating at the i32 range)
    pub fn left(&self, tile_size: i32) -> i32 {
        self.x.saturating_mul(tile_size)
    }

    /// Top edge in pixels (saturating at the i32 range)
    pub fn top(&self, tile_size: i32) -> i32 {
        self.y.saturating_mul(tile_size)
    }
}

/// A cell that could not be read as an integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}, column {column}: {cell:?} is not an integer")]
pub struct CsvCellError {
    /// Zero-based line index
    pub row: usize,
    /// Zero-based cell index within the line
    pub column: usize,
    /// The offending cell text
    pub cell: String,
}

/// Level tile storage, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    tiles: HashMap<TileCoord, i32>,
}

impl Grid {
    /// An all-air grid
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a grid from explicit tiles. Non-positive codes are dropped.
    pub fn from_tiles(tiles: impl IntoIterator<Item = (TileCoord, i32)>) -> Self {
        Self {
            tiles: tiles.into_iter().filter(|&(_, code)| code > EMPTY).collect(),
        }
    }

    /// Parse comma-separated rows of integers.
    ///
    /// Line index is the row (y), cell index is the column (x). Cells are
    /// trimmed before parsing. Blank lines still count as a row but hold
    /// no cells.
    pub fn from_csv_str(text: &str) -> Result<Self, CsvCellError> {
        let mut tiles = Vec::new();

        for (row, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            for (column, cell) in line.split(',').enumerate() {
                let code: i32 = cell.trim().parse().map_err(|_| CsvCellError {
                    row,
                    column,
                    cell: cell.to_string(),
                })?;
                tiles.push((TileCoord::new(column as i32, row as i32), code));
            }
        }

        Ok(Self::from_tiles(tiles))
    }

    /// Tile code at a coordinate (0 when absent)
    pub fn get(&self, coord: TileCoord) -> i32 {
        self.tiles.get(&coord).copied().unwrap_or(EMPTY)
    }

    pub fn is_solid(&self, coord: TileCoord) -> bool {
        self.get(coord) > EMPTY
    }

    /// Number of non-empty tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All non-empty tiles, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, i32)> + '_ {
        self.tiles.iter().map(|(&coord, &code)| (coord, code))
    }

    /// Inclusive (min, max) corners of the occupied area, if any
    pub fn bounds(&self) -> Option<(TileCoord, TileCoord)> {
        let mut coords = self.iter().map(|(coord, _)| coord);
        let first = coords.next()?;
        Some(coords.fold((first, first), |(min, max), c| {
            (
                TileCoord::new(min.x.min(c.x), min.y.min(c.y)),
                TileCoord::new(max.x.max(c.x), max.y.max(c.y)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_and_columns() {
        let grid = Grid::from_csv_str("0,0,1\n2,0,0\n").unwrap();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.get(TileCoord::new(2, 0)), 1);
        assert_eq!(grid.get(TileCoord::new(0, 1)), 2);
        assert_eq!(grid.get(TileCoord::new(1, 1)), EMPTY);
    }

    #[test]
    fn test_absent_coordinates_are_air() {
        let grid = Grid::from_csv_str("1,1\n1,1").unwrap();

        for coord in [
            TileCoord::new(-1, 0),
            TileCoord::new(0, -1),
            TileCoord::new(-500, -500),
            TileCoord::new(2, 0),
            TileCoord::new(i32::MAX, i32::MIN),
        ] {
            assert_eq!(grid.get(coord), EMPTY);
            assert!(!grid.is_solid(coord));
        }
        assert!(Grid::empty().is_empty());
    }

    #[test]
    fn test_cells_are_trimmed_and_crlf_accepted() {
        let grid = Grid::from_csv_str(" 0 , 3 \r\n4,0\r\n").unwrap();
        assert_eq!(grid.get(TileCoord::new(1, 0)), 3);
        assert_eq!(grid.get(TileCoord::new(0, 1)), 4);
    }

    #[test]
    fn test_blank_line_still_advances_row() {
        let grid = Grid::from_csv_str("1\n\n1").unwrap();
        assert!(grid.is_solid(TileCoord::new(0, 0)));
        assert!(!grid.is_solid(TileCoord::new(0, 1)));
        assert!(grid.is_solid(TileCoord::new(0, 2)));
    }

    #[test]
    fn test_negative_codes_are_air() {
        let grid = Grid::from_csv_str("-1,0,7").unwrap();
        assert_eq!(grid.get(TileCoord::new(0, 0)), EMPTY);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_malformed_cell_reports_position() {
        let err = Grid::from_csv_str("0,0\n0,x,0").unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.column, 1);
        assert_eq!(err.cell, "x");

        // Empty cells are malformed too (trailing comma)
        let err = Grid::from_csv_str("1,").unwrap_err();
        assert_eq!((err.row, err.column), (0, 1));
    }

    #[test]
    fn test_from_pixel_floors_negative() {
        assert_eq!(TileCoord::from_pixel(0, 31, 32), TileCoord::new(0, 0));
        assert_eq!(TileCoord::from_pixel(32, 64, 32), TileCoord::new(1, 2));
        assert_eq!(TileCoord::from_pixel(-1, -33, 32), TileCoord::new(-1, -2));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Grid::empty().bounds(), None);
        let grid = Grid::from_tiles([
            (TileCoord::new(3, -2), 1),
            (TileCoord::new(-1, 5), 2),
            (TileCoord::new(0, 0), 0),
        ]);
        assert_eq!(
            grid.bounds(),
            Some((TileCoord::new(-1, -2), TileCoord::new(3, 5)))
        );
    }
}
