//! Internal implementation modules for `wlst-test-core`.

pub mod config;
pub mod pipeline;
pub mod runtime;
pub mod tooling;
