//! Build spec lookup: machine name → ordered list of `%`-prefixed specs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "build_config.yaml";
pub const DEFAULT_MACHINE: &str = "toss_4_x86_64_ib";

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing build config")]
    Parse(#[from] serde_yaml::Error),
    #[error("no specs configured for machine '{0}'")]
    UnknownMachine(String),
}

/// Anything that can list the raw (unprefixed) specs for a machine.
pub trait SpecProvider {
    fn specs_for(&self, machine: &str) -> Result<Vec<String>, SpecError>;
}

/// Where to look specs up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    Yaml(PathBuf),
    Builtin,
}

/// Resolve `machine` against `source`, prefixing every spec with `%`.
pub fn get_specs_for(machine: &str, source: &SpecSource) -> Result<Vec<String>, SpecError> {
    let raw = match source {
        SpecSource::Yaml(path) => YamlConfig::load(path)?.specs_for(machine)?,
        SpecSource::Builtin => BuiltinConfig.specs_for(machine)?,
    };
    log::debug!("{} specs for {machine}", raw.len());
    Ok(raw.into_iter().map(|spec| format!("%{spec}")).collect())
}

// ---------------------------------------------------------------------------
// YAML config
// ---------------------------------------------------------------------------

/// One list entry: either a whole spec or fragments to concatenate.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SpecEntry {
    Whole(String),
    Fragments(Vec<String>),
}

impl SpecEntry {
    fn into_spec(self) -> String {
        match self {
            SpecEntry::Whole(s) => s,
            SpecEntry::Fragments(parts) => parts.concat(),
        }
    }
}

/// `build_config.yaml`: a mapping of machine name to spec list.
///
/// ```yaml
/// toss_4_x86_64_ib:
///   - gcc@10.3.1
///   - [clang@14.0.6, "+devtools"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct YamlConfig {
    machines: BTreeMap<String, Vec<SpecEntry>>,
}

impl YamlConfig {
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

impl SpecProvider for YamlConfig {
    fn specs_for(&self, machine: &str) -> Result<Vec<String>, SpecError> {
        let entries = self
            .machines
            .get(machine)
            .ok_or_else(|| SpecError::UnknownMachine(machine.to_string()))?;
        Ok(entries.iter().cloned().map(SpecEntry::into_spec).collect())
    }
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

const BUILTIN_SPECS: &[(&str, &[&str])] = &[
    ("toss_4_x86_64_ib", &["gcc@10.3.1", "clang@14.0.6", "intel@2022.1.0"]),
    ("blueos_3_ppc64le_ib_p9", &["clang@10.0.1", "gcc@8.3.1", "xl@16.1.1"]),
    ("darwin-x86_64", &["apple-clang@12.0.0"]),
];

/// Specs compiled into the binary, for hosts without a config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinConfig;

impl SpecProvider for BuiltinConfig {
    fn specs_for(&self, machine: &str) -> Result<Vec<String>, SpecError> {
        BUILTIN_SPECS
            .iter()
            .find(|(name, _)| *name == machine)
            .map(|(_, specs)| specs.iter().map(|s| s.to_string()).collect())
            .ok_or_else(|| SpecError::UnknownMachine(machine.to_string()))
    }
}
