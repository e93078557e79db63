//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hostile unit tier. Stats are fixed per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileClass {
    /// Cheap, slow, one hit point. The bulk of every wave.
    Grunt,
    /// Fast runner, two hit points.
    Sprinter,
    /// Slow and heavily armored.
    Juggernaut,
}

impl HostileClass {
    /// Starting hit points.
    pub fn health(self) -> i32 {
        match self {
            HostileClass::Grunt => 1,
            HostileClass::Sprinter => 2,
            HostileClass::Juggernaut => 10,
        }
    }

    /// Base travel speed in path segments per second.
    pub fn speed(self) -> f32 {
        match self {
            HostileClass::Grunt => 1.6,
            HostileClass::Sprinter => 4.0,
            HostileClass::Juggernaut => 1.1,
        }
    }

    /// Wave-budget cost when the generator picks this class.
    pub fn cost(self) -> i64 {
        match self {
            HostileClass::Grunt => 1,
            HostileClass::Sprinter => 2,
            HostileClass::Juggernaut => 4,
        }
    }

    /// Currency credited to the player on kill.
    pub fn reward(self) -> i64 {
        match self {
            HostileClass::Grunt => 1,
            HostileClass::Sprinter => 2,
            HostileClass::Juggernaut => 4,
        }
    }
}

/// Defender variant. Closed set: every variant has exactly one profile
/// entry and one firing-behavior arm in the targeting system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Single-target bolt at the furthest hostile in range.
    Cannon,
    /// Single-target with a much shorter cadence.
    Gatling,
    /// Area-detonation shell, long detection radius.
    Mortar,
    /// Radial 8-way burst of short-lived bolts.
    Scatter,
    /// No projectile: slows every hostile in range.
    Frost,
    /// No projectile: mints currency per hostile in range.
    Mint,
}

/// Static parameters for a defender variant.
pub struct DefenderProfile {
    /// Base seconds between activations.
    pub cadence_secs: f64,
    /// Detection radius in world pixels.
    pub radius: f32,
    /// Purchase price.
    pub price: i64,
}

impl DefenderKind {
    /// Static profile for this variant.
    pub fn profile(self) -> DefenderProfile {
        match self {
            DefenderKind::Cannon => DefenderProfile {
                cadence_secs: 1.0,
                radius: 128.0,
                price: 100,
            },
            DefenderKind::Gatling => DefenderProfile {
                cadence_secs: 0.2,
                radius: 128.0,
                price: 250,
            },
            DefenderKind::Mortar => DefenderProfile {
                cadence_secs: 2.0,
                radius: 195.0,
                price: 200,
            },
            DefenderKind::Scatter => DefenderProfile {
                cadence_secs: 1.0,
                radius: 90.0,
                price: 150,
            },
            DefenderKind::Frost => DefenderProfile {
                cadence_secs: 1.0,
                radius: 90.0,
                price: 120,
            },
            DefenderKind::Mint => DefenderProfile {
                cadence_secs: 3.0,
                radius: 90.0,
                price: 180,
            },
        }
    }
}

/// Projectile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Direct hit: damages the first hostile it overlaps.
    Bolt,
    /// Area detonation: damages everything within the explosion radius,
    /// then lingers briefly without colliding.
    Shell,
}
