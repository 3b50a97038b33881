pub(crate) mod copy;
pub(crate) mod effects;
pub(crate) mod process;

pub use copy::CopySummary;
pub use effects::{
    Effects, ProcessRunner, PropertyResolver, SharedEffects, SystemEffects, TreeCopier,
};
pub use process::{Invocation, RunOutput};
