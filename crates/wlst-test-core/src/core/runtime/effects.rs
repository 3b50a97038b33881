use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;
use wlst_test_domain::Coordinate;

use super::copy::{copy_tree, CopySummary};
use super::process::{run_command_streaming, Invocation, RunOutput};

/// Turns a `group:artifact:type` coordinate into a path value.
pub trait PropertyResolver: Send + Sync {
    /// `Ok(None)` means the coordinate is unknown and its placeholder stays as is.
    fn resolve(&self, coordinate: &Coordinate) -> Result<Option<String>>;
}

pub trait TreeCopier: Send + Sync {
    fn copy_tree(&self, source: &Path, dest: &Path, include: &str) -> Result<CopySummary>;
}

pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<RunOutput>;
}

pub trait Effects: Send + Sync {
    fn resolver(&self) -> &dyn PropertyResolver;
    fn copier(&self) -> &dyn TreeCopier;
    fn runner(&self) -> &dyn ProcessRunner;
}

pub type SharedEffects = Arc<dyn Effects>;

pub struct SystemEffects {
    resolver: Arc<ConfiguredProperties>,
    copier: Arc<FsTreeCopier>,
    runner: Arc<StreamingRunner>,
}

impl SystemEffects {
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(ConfiguredProperties::default()),
            copier: Arc::new(FsTreeCopier),
            runner: Arc::new(StreamingRunner),
        }
    }

    /// Answers coordinate lookups from `properties` (coordinate → path).
    #[must_use]
    pub fn with_resolved_properties(mut self, properties: IndexMap<String, String>) -> Self {
        self.resolver = Arc::new(ConfiguredProperties { properties });
        self
    }
}

impl Default for SystemEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl Effects for SystemEffects {
    fn resolver(&self) -> &dyn PropertyResolver {
        self.resolver.as_ref()
    }

    fn copier(&self) -> &dyn TreeCopier {
        self.copier.as_ref()
    }

    fn runner(&self) -> &dyn ProcessRunner {
        self.runner.as_ref()
    }
}

#[derive(Default)]
struct ConfiguredProperties {
    properties: IndexMap<String, String>,
}

impl PropertyResolver for ConfiguredProperties {
    fn resolve(&self, coordinate: &Coordinate) -> Result<Option<String>> {
        Ok(self.properties.get(coordinate.as_str()).cloned())
    }
}

struct FsTreeCopier;

impl TreeCopier for FsTreeCopier {
    fn copy_tree(&self, source: &Path, dest: &Path, include: &str) -> Result<CopySummary> {
        copy_tree(source, dest, include)
    }
}

struct StreamingRunner;

impl ProcessRunner for StreamingRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunOutput> {
        run_command_streaming(invocation)
    }
}
