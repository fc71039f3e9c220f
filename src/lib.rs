//! Space Inflators: the per-tick simulation core of a grid arcade shooter.
//!
//! The core owns every actor on a 30 × 40 field and advances them one tick
//! at a time. Sound, input, status text and rendering are reached through
//! the traits in `hooks`; the terminal front end in `main.rs` is one
//! implementation of them.

mod behavior;
mod collision;
pub mod entities;
pub mod error;
pub mod hooks;
pub mod random;
pub mod round;
pub mod scoreboard;
pub mod tuning;
pub mod world;

pub use entities::{AlienKind, Cell, Entity, EntityId, EntityKind, PickupKind, Side, Weapon};
pub use error::ConfigError;
pub use hooks::{Hooks, Key, RenderHook, SoundEvent, Sprite};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use tuning::Tuning;
pub use world::{TickStatus, World, PLAYER_START};
