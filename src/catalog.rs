//! Static command catalog loaded once at palette startup.

pub mod command;
pub mod registry;

pub use command::Command;
pub use registry::{Catalog, CATALOG_JSON};
