//! The waypoint path hostile units travel.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::tile_center;

/// Errors detected when validating a path at construction.
/// These indicate a content-authoring bug and abort startup.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path needs at least two waypoints, got {0}")]
    TooShort(usize),
    #[error("waypoints {0} and {1} are not adjacent tiles")]
    NotAdjacent(usize, usize),
}

/// Ordered, immutable-for-the-match list of tile waypoints.
/// Consecutive waypoints are always 4-adjacent.
#[derive(Debug, Clone)]
pub struct Path {
    waypoints: Vec<IVec2>,
}

impl Path {
    /// Validate and wrap a waypoint list.
    pub fn new(waypoints: Vec<IVec2>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooShort(waypoints.len()));
        }
        for i in 1..waypoints.len() {
            let step = waypoints[i] - waypoints[i - 1];
            if step.x.abs() + step.y.abs() != 1 {
                return Err(PathError::NotAdjacent(i - 1, i));
            }
        }
        Ok(Self { waypoints })
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the final waypoint.
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Tile coordinates of a waypoint. An out-of-range index is a
    /// programming error and panics.
    pub fn waypoint(&self, idx: usize) -> IVec2 {
        self.waypoints[idx]
    }

    /// All waypoints, for tile-legality checks.
    pub fn waypoints(&self) -> &[IVec2] {
        &self.waypoints
    }

    /// World-space position of a unit partway along a segment: the lerp
    /// between the two waypoint centers by `progress`.
    pub fn position_between(&self, last: usize, next: usize, progress: f64) -> Vec2 {
        let a = tile_center(self.waypoints[last]);
        let b = tile_center(self.waypoints[next]);
        a.lerp(b, progress as f32)
    }

    /// Whether a tile lies on the path.
    pub fn contains_tile(&self, tile: IVec2) -> bool {
        self.waypoints.contains(&tile)
    }
}

/// A hostile unit's position along the path: the segment it is on plus
/// normalized progress within that segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathPosition {
    /// Index of the last waypoint passed.
    pub last: usize,
    /// Index of the next waypoint ahead. Always `last + 1`.
    pub next: usize,
    /// Normalized progress along the current segment, in [0, 1).
    pub progress: f64,
    /// Count of fully completed segments, for furthest-along
    /// comparisons.
    pub passed: f64,
}

impl PathPosition {
    /// Position at the start of the path.
    pub fn start() -> Self {
        Self {
            last: 0,
            next: 1,
            progress: 0.0,
            passed: 0.0,
        }
    }

    /// Total path advancement: completed segments plus progress on the
    /// current one. Higher means further along.
    pub fn total_progress(&self) -> f64 {
        self.passed + self.progress
    }
}
