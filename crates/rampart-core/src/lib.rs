//! Core types and definitions for the RAMPART simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! units, commands, state snapshots, events, constants, the stable-index
//! arena, and the waypoint path. It has no dependency on any runtime
//! framework and no knowledge of how ticks are driven.

pub mod arena;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod path;
pub mod state;
pub mod tilemap;
pub mod types;
pub mod units;
