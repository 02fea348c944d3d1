//! Slither - grid snake with difficulty-driven acceleration.
//!
//! The simulation lives in [`core`] and has no terminal dependencies, so it can
//! be driven by tests or any frontend. Storage and logging helpers are in
//! [`utils`].

pub mod build_info;
pub mod core;
pub mod utils;

pub use crate::core::{Difficulty, Direction, GameEvent, Phase, Session, Snapshot};
