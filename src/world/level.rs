//! Level loading
//!
//! Reads a CSV tile grid from disk. A failed load is reported but by
//! default does not stop the game: the caller gets an empty grid plus the
//! error, and decides whether to escalate it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use super::{CsvCellError, Grid};

/// Error type for tile grid loading
#[derive(Debug, Error)]
pub enum GridError {
    /// File data is invalid (a cell is not an integer)
    #[error("tile grid is invalid, failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: CsvCellError,
    },
    /// The path does not exist
    #[error("tile grid does not exist: {}", path.display())]
    NotFound { path: PathBuf },
    /// Any other I/O failure
    #[error("failed to open tile grid {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GridError {
    /// Path of the grid file that failed
    pub fn path(&self) -> &Path {
        match self {
            GridError::Parse { path, .. }
            | GridError::NotFound { path }
            | GridError::Io { path, .. } => path,
        }
    }
}

/// Load a grid, propagating any failure
pub fn load_grid(path: &Path) -> Result<Grid, GridError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GridError::NotFound {
            path: path.to_path_buf(),
        },
        _ => GridError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    Grid::from_csv_str(&text).map_err(|source| GridError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Outcome of a tolerant load: always a usable grid, plus the error if
/// the file could not be read
#[derive(Debug)]
pub struct LoadedGrid {
    pub grid: Grid,
    pub error: Option<GridError>,
}

impl LoadedGrid {
    /// Turn a degraded load back into a hard failure
    pub fn into_strict(self) -> Result<Grid, GridError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.grid),
        }
    }
}

/// Load a grid, falling back to an empty one on failure.
/// The failure is logged and returned alongside the empty grid.
pub fn load_grid_or_empty(path: &Path) -> LoadedGrid {
    match load_grid(path) {
        Ok(grid) => {
            if grid.is_empty() {
                log::warn!("Loaded tile grid {} but it has no solid tiles", path.display());
            } else if let Some((min, max)) = grid.bounds() {
                log::info!(
                    "Loaded tile grid {} ({} tiles, ({}, {})..=({}, {}))",
                    path.display(),
                    grid.len(),
                    min.x,
                    min.y,
                    max.x,
                    max.y
                );
            }
            LoadedGrid { grid, error: None }
        }
        Err(e) => {
            log::error!("TILEMAP ERROR: {}", e);
            LoadedGrid {
                grid: Grid::empty(),
                error: Some(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileCoord;
    use tempfile::TempDir;

    fn write_level(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = write_level(&dir, "level.csv", "0,0\n1,1\n");

        let loaded = load_grid_or_empty(&path);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.grid.len(), 2);
        assert!(loaded.grid.is_solid(TileCoord::new(1, 1)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        let result = load_grid(&path);
        assert!(matches!(result, Err(GridError::NotFound { .. })));
        assert_eq!(result.unwrap_err().path(), path.as_path());
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_grid(dir.path());
        assert!(matches!(result, Err(GridError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_level(&dir, "bad.csv", "1,1\n1,abc\n");

        let loaded = load_grid_or_empty(&path);
        match &loaded.error {
            Some(GridError::Parse { source, .. }) => {
                assert_eq!((source.row, source.column), (1, 1));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(loaded.grid.is_empty());
        for y in -3..3 {
            for x in -3..3 {
                assert!(!loaded.grid.is_solid(TileCoord::new(x, y)));
            }
        }
    }

    #[test]
    fn test_strict_escalates() {
        let dir = TempDir::new().unwrap();
        let bad = write_level(&dir, "bad.csv", "z");
        let good = write_level(&dir, "good.csv", "1");

        assert!(load_grid_or_empty(&bad).into_strict().is_err());
        assert_eq!(load_grid_or_empty(&good).into_strict().unwrap().len(), 1);
    }

    #[test]
    fn test_error_message_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        let msg = load_grid(&path).unwrap_err().to_string();
        assert!(msg.contains("missing.csv"));
    }
}
