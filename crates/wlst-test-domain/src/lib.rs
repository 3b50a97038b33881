#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod classpath;
pub mod config;
pub mod paths;

pub use classpath::{replace_placeholders, ClasspathEntry, Coordinate};
pub use config::{
    ConfigOverrides, TestConfig, ToolVersions, BUILTIN_TOOL_VERSION, CONFIG_FILE_NAME,
    DEFAULT_VERBOSITY, WLST_DIR_NOT_SET,
};
pub use paths::{canonical_or_absolute, resolve_against};
