//! Shared identifier types used across the enrollment service crates.

pub mod types;

pub use types::{ContactNumber, Reference};
