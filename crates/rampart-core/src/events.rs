//! Effect events emitted by the simulation for the frontend.
//!
//! The engine pushes events into a buffer during the tick and drains
//! the buffer into each snapshot. Audio, particles, and UI toasts all
//! hang off these; the simulation itself has no global audio or asset
//! state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{DefenderKind, HostileClass};

/// Effect events for the frontend sound/particle systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectEvent {
    /// A new wave started spawning.
    WaveStarted { wave: u32, size: usize },
    /// The spawn queue drained and the last hostile of the wave died
    /// or leaked.
    WaveCleared { wave: u32 },
    /// A defender fired (or activated, for Frost/Mint).
    DefenderFired { kind: DefenderKind },
    /// A shell detonated.
    Detonation { position: Vec2, radius: f32 },
    /// A hostile was slain; its reward was credited.
    HostileSlain { class: HostileClass, reward: i64 },
    /// A hostile reached the end of the path and damaged the base.
    HostileLeaked { class: HostileClass },
    /// The base ran out of hit points.
    BaseDestroyed,
    /// Currency minted by a Mint defender.
    CurrencyMinted { amount: i64 },
    /// A defender was placed.
    DefenderPlaced { kind: DefenderKind },
    /// A defender was sold.
    DefenderSold { kind: DefenderKind, refund: i64 },
    /// Every hostile on the field was destroyed at once.
    Nuke { destroyed: usize },
}
