//! Tile legality grid, parsed from the map definition text.
//!
//! The map format is one character per tile: `.` for open ground the
//! path runs over, `p` for a platform a defender can be built on.

use glam::IVec2;
use thiserror::Error;

/// Errors detected while parsing a map definition.
#[derive(Debug, Error)]
pub enum TileMapError {
    #[error("row {row} is {got} tiles wide, expected {expected}")]
    BadRowWidth {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("map has {got} rows, expected {expected}")]
    BadRowCount { got: usize, expected: usize },
    #[error("unknown map character {0:?} at row {1}")]
    UnknownTile(char, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileKind {
    Open,
    Platform,
}

/// The match's tile legality grid.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// Parse a map definition. Leading and trailing blank lines are
    /// ignored; every row must be exactly `width` characters and there
    /// must be exactly `height` rows.
    pub fn parse(def: &str, width: i32, height: i32) -> Result<Self, TileMapError> {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        let mut rows = 0usize;
        for line in def.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.chars().count() != width as usize {
                return Err(TileMapError::BadRowWidth {
                    row: rows,
                    got: line.chars().count(),
                    expected: width as usize,
                });
            }
            for ch in line.chars() {
                tiles.push(match ch {
                    '.' => TileKind::Open,
                    'p' => TileKind::Platform,
                    other => return Err(TileMapError::UnknownTile(other, rows)),
                });
            }
            rows += 1;
        }
        if rows != height as usize {
            return Err(TileMapError::BadRowCount {
                got: rows,
                expected: height as usize,
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether a tile lies inside the map bounds.
    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.x < self.width && tile.y >= 0 && tile.y < self.height
    }

    /// Whether a tile is a buildable platform. Out-of-bounds tiles are
    /// never buildable.
    pub fn is_platform(&self, tile: IVec2) -> bool {
        self.in_bounds(tile) && self.tiles[(tile.y * self.width + tile.x) as usize] == TileKind::Platform
    }
}
