//! Folio Application Library
//!
//! Application modules for the folio book catalog service.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
