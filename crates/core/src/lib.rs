//! Domain building blocks shared by the Commander crates.
//!
//! Holds the primitive id type, the domain error enum, and helpers for
//! shaping validation failures.

pub mod error;
pub mod types;
pub mod validation;
