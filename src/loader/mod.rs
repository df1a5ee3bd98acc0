//! Specification loading module.

mod link;
mod options;
mod spec_loader;

pub use options::{ErrorMode, LoadOptions};
pub use spec_loader::SpecLoader;

#[cfg(feature = "async")]
pub use spec_loader::load_file_async;
