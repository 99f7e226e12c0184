//! Authored scripts on disk.
//!
//! A script file holds exactly one of `tree:` (any node) or `sequence:`
//! (a list of leaves):
//!
//! ```yaml
//! tree:
//!   kind: sequence
//!   children:
//!     - { kind: wait, duration: 1.0 }
//!     - { kind: move_by, vector: { x: 5.0, y: 0.0 }, speed: 5.0 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ActionNode, ActionSequence, Script};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported script format for {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptFile {
    Tree(ActionNode),
    Sequence(Vec<ActionNode>),
}

/// YAML reads an externally tagged enum as `!tag`; scripts use a one-key map.
#[derive(Deserialize)]
struct YamlScript(#[serde(with = "serde_yaml::with::singleton_map")] ScriptFile);

#[derive(Serialize)]
struct YamlScriptRef<'a>(#[serde(with = "serde_yaml::with::singleton_map")] &'a ScriptFile);

impl ScriptFile {
    pub fn from_yaml_str(source: &str) -> Result<Self, LoadError> {
        let YamlScript(file) = serde_yaml::from_str(source)?;
        Ok(file)
    }

    pub fn from_json_str(source: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, LoadError> {
        Ok(serde_yaml::to_string(&YamlScriptRef(self))?)
    }

    pub fn into_script(self) -> Script {
        match self {
            ScriptFile::Tree(root) => Script::Tree(root),
            ScriptFile::Sequence(actions) => Script::Sequence(ActionSequence::new(actions)),
        }
    }
}

impl From<ScriptFile> for Script {
    fn from(file: ScriptFile) -> Self {
        file.into_script()
    }
}

/// Read a script, choosing the format from the file extension.
pub fn load_script(path: &Path) -> Result<ScriptFile, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str) -> Result<ScriptFile, LoadError> = match extension.as_deref() {
        Some("yaml" | "yml") => ScriptFile::from_yaml_str,
        Some("json") => ScriptFile::from_json_str,
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };

    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loading script");
    parse(&source)
}
