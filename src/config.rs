//! Per-backend registry configuration
//!
//! One `RegistryConfig` is parsed from each sub-tree under the broker's
//! `registry` namespace at startup and stays immutable for the life of the
//! process. The `type` field selects which built-in adapter is constructed
//! unless the caller injects one directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RegistryError, Result};

/// Built-in adapter variants a configuration can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Container-registry catalog (v1 search, v2 manifests)
    Rhcc,
    /// Public hub (token login, paged repository listing)
    DockerHub,
    /// Deterministic in-memory backend for tests and demos
    Mock,
}

impl FromStr for BackendKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rhcc" => Ok(BackendKind::Rhcc),
            "dockerhub" => Ok(BackendKind::DockerHub),
            "mock" => Ok(BackendKind::Mock),
            other => Err(RegistryError::UnsupportedBackend(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Rhcc => "rhcc",
            BackendKind::DockerHub => "dockerhub",
            BackendKind::Mock => "mock",
        };
        f.write_str(name)
    }
}

/// Settings for a single configured registry backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Backend selector; ignored when an adapter is injected
    #[serde(rename = "type", default)]
    pub backend: String,

    /// Registry display name; alphanumeric and hyphen only
    #[serde(default)]
    pub name: String,

    /// Base URL for HTTP backends, or fixture path for the mock backend
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub pass: String,

    /// Organization/namespace whose repositories are enumerated
    #[serde(default)]
    pub org: String,

    /// Image tag whose metadata is fetched (defaults to "latest")
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Whether an error from this registry aborts the whole catalog sync
    #[serde(default)]
    pub fail: bool,

    /// Glob patterns an image name must match to be considered
    #[serde(default)]
    pub white_list: Vec<String>,

    /// Glob patterns that exclude an image name; wins over `white_list`
    #[serde(default)]
    pub black_list: Vec<String>,

    /// Lowest accepted spec schema major version, as a "major.minor" pair
    #[serde(default = "default_min_version")]
    pub min_version: String,

    /// Highest accepted spec schema major version, as a "major.minor" pair
    #[serde(default = "default_max_version")]
    pub max_version: String,

    /// Floor for a spec's declared runtime marker
    #[serde(default = "default_min_runtime")]
    pub min_runtime: i32,
}

fn default_tag() -> String {
    "latest".to_string()
}

fn default_min_version() -> String {
    "1.0".to_string()
}

fn default_max_version() -> String {
    "1.0".to_string()
}

fn default_min_runtime() -> i32 {
    1
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: String::new(),
            name: String::new(),
            url: String::new(),
            user: String::new(),
            pass: String::new(),
            org: String::new(),
            tag: default_tag(),
            fail: false,
            white_list: Vec::new(),
            black_list: Vec::new(),
            min_version: default_min_version(),
            max_version: default_max_version(),
            min_runtime: default_min_runtime(),
        }
    }
}

impl RegistryConfig {
    /// Parse one backend's configuration from a YAML sub-tree.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Validate the registry name charset.
    ///
    /// The name ends up in log lines and catalog identifiers, so anything
    /// outside alphanumerics and hyphens is rejected up front.
    pub fn validate_name(&self) -> Result<()> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(RegistryError::InvalidName(self.name.clone()));
        }
        Ok(())
    }

    /// Parse the configured backend selector.
    pub fn backend_kind(&self) -> Result<BackendKind> {
        self.backend.parse()
    }
}
