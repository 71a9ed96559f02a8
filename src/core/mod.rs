//! Error types, clocks and the validated service layer.

pub mod errors;
pub mod services;
pub mod time;
