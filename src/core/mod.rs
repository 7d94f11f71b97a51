//! Platform-independent core: contract, types, errors, registry, timeouts

pub mod catalog;
pub mod error;
pub mod module;
pub mod registry;
pub mod timeout;
pub mod types;

pub use error::{parse_error, ErrorShape, KitError, KitResult};
pub use module::{ModuleInterface, ModuleRef};
pub use registry::{ModuleFilter, ModuleRegistry};
pub use types::*;
