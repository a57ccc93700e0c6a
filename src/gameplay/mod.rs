//! Bevy systems that drive the game logic each frame.
//!
//! This module wires the engine-agnostic state types (`player`, `behaviour`,
//! `inhale`) into the ECS. [`PuffballPlugin`] registers the resources,
//! messages and the ordered [`GameSet`] schedule; the systems are also
//! exposed individually for tests.

mod clock;
mod contacts;
mod enemies;
mod input;
mod plugin;
mod rig;

pub use clock::{advance_clock_system, SimClock};
pub use contacts::{
    inhale_zone_contact_system, player_contact_system, player_fall_system,
    projectile_contact_system, projectile_cull_system, projectile_expired,
};
pub use enemies::{
    bird_cull_system, bird_flight_system, flame_system, guy_system, inhale_pull_system,
};
pub use input::{player_input_system, INHALE_KEY, JUMP_KEY, MOVE_LEFT_KEY, MOVE_RIGHT_KEY};
pub use plugin::{GameSet, GameplayFault, GameplayFaultContext, PuffballPlugin};
pub use rig::{inhale_rig_system, player_upkeep_system};
