//! Core types and errors for CSV to libSVM conversion

pub mod error;
pub mod types;

pub use self::error::*;
pub use self::types::*;
