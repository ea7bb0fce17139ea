//! Input adapters for the engine.

pub mod json;
