//! Storage layer: one JSON document per game.

mod error;
mod json;

pub use error::StoreError;
pub use json::{JsonStore, STORAGE_KEY, default_path};
