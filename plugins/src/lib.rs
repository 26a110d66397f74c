//! Provider backends for the Smith pipeline.

pub mod backend;
pub mod registry;

pub use registry::{ProviderKind, ProviderRegistry};
