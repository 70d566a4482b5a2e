//! Kernel primitives for folio: settings loading, the module lifecycle
//! trait, and the registry that drives init/start/stop ordering.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
