//! Schema Type Definitions
//!
//! This crate contains the declarative schema consumed by the lazy accessor
//! generator: record types, their fields, and the physical byte layout of each
//! type. It provides pure data structures without any file I/O or code
//! generation logic.

pub mod types;

// Re-export commonly used types at the crate root
pub use types::*;
