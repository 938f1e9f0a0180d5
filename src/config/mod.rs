//! Configuration module for MDX Converter
//!
//! This module handles user preferences and the local document store,
//! including serialization to/from JSON and persistent storage in
//! platform-specific directories.

mod persistence;
mod settings;
pub mod storage;

pub use persistence::*;
pub use settings::*;
pub use storage::{LocalStore, STORAGE_KEY};
