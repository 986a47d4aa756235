//! Filesystem abstraction for deploy-graph
//!
//! Provides normalized path handling, resolution of cross-document
//! references and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod reference;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use reference::{DEFAULT_FILE_NAME, PathResolver};
