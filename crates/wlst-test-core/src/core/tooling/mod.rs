//! CLI-facing diagnostics, error codes, and outcome shaping.

pub(crate) mod diagnostics;
pub(crate) mod errors;
pub(crate) mod outcome;
