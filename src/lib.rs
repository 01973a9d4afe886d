//! Deterministic, frame-stepped simulation core for a platform-fighter character.
//!
//! The crate has two tightly coupled halves:
//!
//! - [`input`] turns raw, already-polled axis/button readings into classified
//!   per-frame snapshots (dead-zone filtering, tap/tilt/switch recognition, a
//!   bounded history buffer, and a chainable gesture-recognition protocol).
//! - [`character`] drives the character's movement state machine
//!   (idle/walk/dash/run/pivot/skid/jump/airborne/air-dodge/wave-land) from
//!   those snapshots, accumulating velocity, transient force, and gravity
//!   scaling for an external physics integrator.
//!
//! Everything is synchronous and single-writer. The embedding engine owns the
//! frame loop and calls, in order: [`Stream::advance`], then
//! [`Character::pre_update`] / [`Character::update`], runs its physics step,
//! then [`Character::post_simulation`] (and [`Character::on_collide`] when the
//! body touches ground). Frame windows are integer frame counts, never
//! wall-clock timers, so identical input sequences replay identically.

pub mod character;
pub mod input;
pub mod math;
pub mod tuning;

pub use character::{Character, CharacterState};
pub use input::{InputStream, Source, Stream};
pub use math::Vec2;
pub use tuning::Tuning;
