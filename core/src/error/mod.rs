#[allow(clippy::module_inception)]
pub mod error;
pub mod dispatch;

pub use dispatch::{DispatchError, ProviderInitError};
pub use error::{SchemaViolation, SmithError};
