//! Service layer: pure computation plus orchestration over the repositories.
//!
//! Each stage is an ordinary function over in-memory data so it can be
//! tested without storage; `prediction::get_prediction` is the async
//! entry point that wires the stages together.

pub mod clustering;
pub mod corridors;
pub mod loader;
pub mod prediction;
pub mod scoring;

pub use prediction::{compute_prediction, get_prediction};
