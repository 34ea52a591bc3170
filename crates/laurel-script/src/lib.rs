//! Laurel Script - RON catalog loader
//!
//! Loads engine configuration from RON files:
//! - Level thresholds and level-up rewards
//! - Badge definitions
//! - Daily quest templates with completion conditions
//! - XP action values
//! - Streak milestone rules
//!
//! Definitions are accumulated across files with [`Loader`] and validated
//! as one bundle, producing a [`laurel_core::Catalog`] ready to hand to
//! the engine.

mod error;
mod loader;

pub use error::{Error, Result};
pub use loader::Loader;
