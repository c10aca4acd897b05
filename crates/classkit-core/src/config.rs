//! Optional file-based defaults for the CLI
//!
//! A `classkit.yml` in the working directory can carry the values that stay
//! constant across a course, so per-run flags only have to name what changes:
//!
//! ```yaml
//! organization: tulane-cmps2200
//! assignment_prefix: assignment-01
//! api_url: https://api.github.com
//! pacing_ms: 50
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "classkit.yml";

/// Values loadable from `classkit.yml`; all optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// GitHub API base URL override
    pub api_url: Option<String>,
    /// Organization owning the assignment repositories
    pub organization: Option<String>,
    /// Assignment name prefix
    pub assignment_prefix: Option<String>,
    /// Username used for authenticated clones
    pub username: Option<String>,
    /// Inter-student pacing delay in milliseconds
    pub pacing_ms: Option<u64>,
}

impl FileConfig {
    /// Parse config from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Yaml(e.to_string()))
    }

    /// Load config from a specific file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Load `classkit.yml` from the working directory if present.
    /// A missing file is not an error; a malformed one is.
    pub fn discover() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).is_file() {
            Self::load(DEFAULT_CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }
}
