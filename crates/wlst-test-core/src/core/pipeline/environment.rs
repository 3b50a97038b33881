use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;
use wlst_test_domain::{canonical_or_absolute, resolve_against, ClasspathEntry, TestConfig};

use crate::core::tooling::errors::WlstTestError;

pub const CLASSPATH_VARIABLE: &str = "CLASSPATH";
pub const EXT_CLASSPATH_VARIABLE: &str = "WLST_EXT_CLASSPATH";
pub const PROPERTIES_VARIABLE: &str = "WLST_PROPERTIES";
pub const DEBUG_PROPERTY: &str = "wlst.test.plugin.debug";

pub const CLASSPATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Variables that only their dedicated setting may produce, with that setting's name.
pub const RESERVED_VARIABLES: &[(&str, &str)] = &[
    (CLASSPATH_VARIABLE, "wlstExtClasspath"),
    (EXT_CLASSPATH_VARIABLE, "wlstExtClasspath"),
    (PROPERTIES_VARIABLE, "systemProperties"),
];

pub fn reserved_field(name: &str) -> Option<&'static str> {
    RESERVED_VARIABLES
        .iter()
        .find(|(reserved, _)| {
            if cfg!(windows) {
                reserved.eq_ignore_ascii_case(name)
            } else {
                *reserved == name
            }
        })
        .map(|(_, field)| *field)
}

/// Variables handed to the interpreter on top of the inherited environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvironmentSet {
    vars: IndexMap<String, String>,
}

impl EnvironmentSet {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        debug!(%name, %value, "environment");
        self.vars.insert(name, value);
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.vars.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

pub struct EnvironmentBuilder<'a> {
    config: &'a TestConfig,
    debug: bool,
}

impl<'a> EnvironmentBuilder<'a> {
    pub fn new(config: &'a TestConfig, debug: bool) -> Self {
        Self { config, debug }
    }

    pub fn build(&self) -> Result<EnvironmentSet, WlstTestError> {
        for name in self.config.environment_variables.keys() {
            if let Some(field) = reserved_field(name) {
                return Err(WlstTestError::ReservedVariable {
                    name: name.clone(),
                    field,
                });
            }
        }

        let mut env = EnvironmentSet::default();
        for (name, value) in &self.config.environment_variables {
            env.insert(name.as_str(), value.as_str());
        }
        env.insert(self.classpath_variable(), self.classpath_value());
        if let Some(properties) = self.properties_value() {
            env.insert(PROPERTIES_VARIABLE, properties);
        }
        Ok(env)
    }

    /// Legacy launchers only read `CLASSPATH`; newer ones read `WLST_EXT_CLASSPATH`.
    pub fn classpath_variable(&self) -> &'static str {
        if self.config.using_old_wlst_version {
            CLASSPATH_VARIABLE
        } else {
            EXT_CLASSPATH_VARIABLE
        }
    }

    /// Extra entries in order, then the build output directory.
    pub fn classpath_value(&self) -> String {
        let root = &self.config.project_root;
        let mut entries: Vec<String> = self
            .config
            .wlst_ext_classpath
            .iter()
            .map(|raw| match ClasspathEntry::parse(raw) {
                ClasspathEntry::Coordinate(coordinate) => coordinate.placeholder(),
                ClasspathEntry::Path(path) => canonical_or_absolute(&resolve_against(root, &path))
                    .display()
                    .to_string(),
            })
            .collect();
        entries.push(
            canonical_or_absolute(&self.config.build_output_directory)
                .display()
                .to_string(),
        );
        entries.join(CLASSPATH_SEPARATOR)
    }

    /// `None` when there is nothing to pass, so the variable is left out entirely.
    pub fn properties_value(&self) -> Option<String> {
        let mut tokens = Vec::new();
        if self.debug {
            tokens.push(format!("-D{DEBUG_PROPERTY}=true"));
        }
        if let Some(line) = self
            .config
            .arg_line
            .as_deref()
            .filter(|line| !line.trim().is_empty())
        {
            tokens.push(line.to_string());
        }
        for (name, value) in &self.config.system_properties {
            tokens.push(format!("-D{name}={value}"));
        }
        (!tokens.is_empty()).then(|| tokens.join(" "))
    }
}
