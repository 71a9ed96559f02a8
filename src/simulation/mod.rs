//! Wealth projection over recurring cash flows.

pub mod engine;
pub mod types;

pub use engine::ProjectionEngine;
pub use types::{Projection, ProjectionParams, ProjectionPoint, ProjectionRequest};
