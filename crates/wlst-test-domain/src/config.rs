use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use toml_edit::{DocumentMut, Item, Table, Value};

use crate::paths::resolve_against;

pub const CONFIG_FILE_NAME: &str = "wlst-test.toml";
/// File name that marks `wlstScriptDirectory` as deliberately unset.
pub const WLST_DIR_NOT_SET: &str = "NOT-SET";
pub const DEFAULT_VERBOSITY: i64 = 2;
pub const BUILTIN_TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_SOURCES_ROOT: &str = "src/main/python";
const DEFAULT_TESTS_ROOT: &str = "src/test/python";
const DEFAULT_BUILD_OUTPUT: &str = "target/classes";
const DEFAULT_STAGING: &str = "target/wlst-tests";

/// Versions of the three delegated operations (dependency resolution,
/// resource copying, process execution).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolVersions {
    pub dependency_resolver: String,
    pub resource_copier: String,
    pub process_runner: String,
}

impl Default for ToolVersions {
    fn default() -> Self {
        Self {
            dependency_resolver: BUILTIN_TOOL_VERSION.to_string(),
            resource_copier: BUILTIN_TOOL_VERSION.to_string(),
            process_runner: BUILTIN_TOOL_VERSION.to_string(),
        }
    }
}

/// Snapshot of every user-tunable setting for one test run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestConfig {
    pub project_root: PathBuf,
    pub wlst_script_directory: Option<PathBuf>,
    pub sources_root: PathBuf,
    pub tests_root: PathBuf,
    pub build_output_directory: PathBuf,
    pub staging_directory: PathBuf,
    pub verbosity: i64,
    pub skip_tests: bool,
    pub skip_module_scanning: bool,
    pub using_old_wlst_version: bool,
    pub environment_variables: IndexMap<String, String>,
    pub system_properties: IndexMap<String, String>,
    pub wlst_ext_classpath: Vec<String>,
    pub arg_line: Option<String>,
    pub tool_versions: ToolVersions,
    pub resolved_properties: IndexMap<String, String>,
}

impl TestConfig {
    pub fn with_defaults(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            wlst_script_directory: None,
            sources_root: project_root.join(DEFAULT_SOURCES_ROOT),
            tests_root: project_root.join(DEFAULT_TESTS_ROOT),
            build_output_directory: project_root.join(DEFAULT_BUILD_OUTPUT),
            staging_directory: project_root.join(DEFAULT_STAGING),
            verbosity: DEFAULT_VERBOSITY,
            skip_tests: false,
            skip_module_scanning: true,
            using_old_wlst_version: false,
            environment_variables: IndexMap::new(),
            system_properties: IndexMap::new(),
            wlst_ext_classpath: Vec::new(),
            arg_line: None,
            tool_versions: ToolVersions::default(),
            resolved_properties: IndexMap::new(),
        }
    }

    /// Loads `wlst-test.toml` for `project_root`.
    ///
    /// An explicit `config_path` must exist; the default file is optional and
    /// defaults apply when it is absent.
    pub fn load(project_root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(explicit) => {
                let path = resolve_against(project_root, explicit);
                if !path.is_file() {
                    return Err(anyhow!("configuration file {} not found", path.display()));
                }
                path
            }
            None => {
                let path = project_root.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    return Ok(Self::with_defaults(project_root));
                }
                path
            }
        };
        let contents =
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(project_root, &contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml_str(project_root: &Path, contents: &str) -> Result<Self> {
        let doc: DocumentMut = contents.parse()?;
        let mut config = Self::with_defaults(project_root);
        config.merge_table(doc.as_table())?;
        Ok(config)
    }

    fn merge_table(&mut self, table: &Table) -> Result<()> {
        let root = self.project_root.clone();
        if let Some(path) = read_path(table, "wlstScriptDirectory", &root)? {
            self.wlst_script_directory = Some(path);
        }
        if let Some(path) = read_path(table, "wlstSourcesRootDirectory", &root)? {
            self.sources_root = path;
        }
        if let Some(path) = read_path(table, "wlstTestsRootDirectory", &root)? {
            self.tests_root = path;
        }
        if let Some(path) = read_path(table, "buildOutputDirectory", &root)? {
            self.build_output_directory = path;
        }
        if let Some(path) = read_path(table, "stagingDirectory", &root)? {
            self.staging_directory = path;
        }
        if let Some(level) = read_integer(table, "verbosity")? {
            self.verbosity = level;
        }
        if let Some(flag) = read_bool(table, "skipTests")? {
            self.skip_tests = flag;
        }
        if let Some(flag) = read_bool(table, "skipModuleScanning")? {
            self.skip_module_scanning = flag;
        }
        if let Some(flag) = read_bool(table, "usingOldWlstVersion")? {
            self.using_old_wlst_version = flag;
        }
        if let Some(entries) = read_string_array(table, "wlstExtClasspath")? {
            self.wlst_ext_classpath = entries;
        }
        if let Some(line) = read_string(table, "argLine")? {
            self.arg_line = Some(line);
        }
        self.environment_variables
            .extend(read_string_table(table, "environmentVariables")?);
        self.system_properties
            .extend(read_string_table(table, "systemProperties")?);
        self.resolved_properties
            .extend(read_string_table(table, "resolvedProperties")?);
        if let Some(tools) = table.get("toolVersions") {
            let tools = tools
                .as_table_like()
                .ok_or_else(|| anyhow!("`toolVersions` must be a table"))?;
            for (key, item) in tools.iter() {
                let version = item
                    .as_str()
                    .ok_or_else(|| anyhow!("`toolVersions.{key}` must be a string"))?
                    .trim()
                    .to_string();
                match key {
                    "dependencyResolver" => self.tool_versions.dependency_resolver = version,
                    "resourceCopier" => self.tool_versions.resource_copier = version,
                    "processRunner" => self.tool_versions.process_runner = version,
                    other => return Err(anyhow!("unknown tool `toolVersions.{other}`")),
                }
            }
        }
        Ok(())
    }

    /// Layers command-line values over this configuration.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let root = self.project_root.clone();
        let resolve = |path: PathBuf| resolve_against(&root, &path);
        if let Some(path) = overrides.wlst_script_directory {
            self.wlst_script_directory = Some(resolve(path));
        }
        if let Some(path) = overrides.sources_root {
            self.sources_root = resolve(path);
        }
        if let Some(path) = overrides.tests_root {
            self.tests_root = resolve(path);
        }
        if let Some(path) = overrides.build_output_directory {
            self.build_output_directory = resolve(path);
        }
        if let Some(path) = overrides.staging_directory {
            self.staging_directory = resolve(path);
        }
        if let Some(level) = overrides.verbosity {
            self.verbosity = level;
        }
        if let Some(flag) = overrides.skip_tests {
            self.skip_tests = flag;
        }
        if let Some(flag) = overrides.skip_module_scanning {
            self.skip_module_scanning = flag;
        }
        if let Some(flag) = overrides.using_old_wlst_version {
            self.using_old_wlst_version = flag;
        }
        if let Some(line) = overrides.arg_line {
            self.arg_line = Some(line);
        }
        self.wlst_ext_classpath.extend(overrides.wlst_ext_classpath);
        self.environment_variables
            .extend(overrides.environment_variables);
        self.system_properties.extend(overrides.system_properties);
        self.resolved_properties
            .extend(overrides.resolved_properties);
    }

    /// Whether `wlstScriptDirectory` holds a real value (not absent, not the sentinel).
    pub fn wlst_script_directory_is_set(&self) -> bool {
        self.wlst_script_directory.as_deref().is_some_and(|dir| {
            !dir.as_os_str().is_empty()
                && dir.file_name().and_then(|name| name.to_str()) != Some(WLST_DIR_NOT_SET)
        })
    }
}

/// Values supplied on the command line; `None` / empty leaves the file value alone.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub wlst_script_directory: Option<PathBuf>,
    pub sources_root: Option<PathBuf>,
    pub tests_root: Option<PathBuf>,
    pub build_output_directory: Option<PathBuf>,
    pub staging_directory: Option<PathBuf>,
    pub verbosity: Option<i64>,
    pub skip_tests: Option<bool>,
    pub skip_module_scanning: Option<bool>,
    pub using_old_wlst_version: Option<bool>,
    pub arg_line: Option<String>,
    pub wlst_ext_classpath: Vec<String>,
    pub environment_variables: Vec<(String, String)>,
    pub system_properties: Vec<(String, String)>,
    pub resolved_properties: Vec<(String, String)>,
}

fn read_string(table: &Table, key: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_str()
            .map(|value| Some(value.to_string()))
            .ok_or_else(|| anyhow!("`{key}` must be a string")),
    }
}

fn read_path(table: &Table, key: &str, root: &Path) -> Result<Option<PathBuf>> {
    Ok(read_string(table, key)?.map(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            PathBuf::new()
        } else {
            resolve_against(root, Path::new(trimmed))
        }
    }))
}

fn read_bool(table: &Table, key: &str) -> Result<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_bool()
            .map(Some)
            .ok_or_else(|| anyhow!("`{key}` must be a boolean")),
    }
}

fn read_integer(table: &Table, key: &str) -> Result<Option<i64>> {
    match table.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_integer()
            .map(Some)
            .ok_or_else(|| anyhow!("`{key}` must be an integer")),
    }
}

fn read_string_array(table: &Table, key: &str) -> Result<Option<Vec<String>>> {
    let Some(item) = table.get(key) else {
        return Ok(None);
    };
    let array = item
        .as_array()
        .ok_or_else(|| anyhow!("`{key}` must be an array of strings"))?;
    let mut entries = Vec::new();
    for value in array.iter() {
        let entry = value
            .as_str()
            .ok_or_else(|| anyhow!("`{key}` must be an array of strings"))?
            .trim();
        if !entry.is_empty() {
            entries.push(entry.to_string());
        }
    }
    Ok(Some(entries))
}

fn read_string_table(table: &Table, key: &str) -> Result<IndexMap<String, String>> {
    let mut values = IndexMap::new();
    let Some(item) = table.get(key) else {
        return Ok(values);
    };
    let entries = item
        .as_table_like()
        .ok_or_else(|| anyhow!("`{key}` must be a table"))?;
    for (name, value) in entries.iter() {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let rendered = item_scalar(value)
            .ok_or_else(|| anyhow!("`{key}.{name}` must be a string, number, or boolean"))?;
        values.insert(name.to_string(), rendered);
    }
    Ok(values)
}

fn item_scalar(item: &Item) -> Option<String> {
    match item.as_value()? {
        Value::String(value) => Some(value.value().clone()),
        Value::Integer(value) => Some(value.value().to_string()),
        Value::Float(value) => Some(value.value().to_string()),
        Value::Boolean(value) => Some(value.value().to_string()),
        _ => None,
    }
}
