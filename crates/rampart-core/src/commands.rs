//! Outcomes of player actions against the simulation.
//!
//! Rejections here are not errors: the simulation state is unchanged
//! and the frontend surfaces them as a message. Nothing in this module
//! is ever thrown across the core boundary.

use serde::{Deserialize, Serialize};

/// Result of attempting to place a defender on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlaceOutcome {
    /// Defender placed; price deducted.
    Placed,
    /// Player cannot afford this defender.
    InsufficientFunds,
    /// Another defender already occupies the tile.
    Occupied,
    /// The tile lies on the hostile path.
    OnPath,
    /// The tile is open ground, not a buildable platform.
    NotBuildable,
    /// The tile is outside the map.
    OffMap,
}

/// Result of attempting to upgrade a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UpgradeOutcome {
    /// Upgrade applied; cost deducted.
    Upgraded,
    /// Player cannot afford the upgrade.
    InsufficientFunds,
    /// Per-kind or combined upgrade cap reached.
    MaxedOut,
    /// No defender on that tile.
    NoDefender,
}

/// Result of attempting to sell a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SellOutcome {
    /// Defender removed; `refund` credited.
    Sold { refund: i64 },
    /// No defender on that tile.
    NoDefender,
}
