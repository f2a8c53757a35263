//! Registry backend adapters
//!
//! An adapter knows how to enumerate images and fetch spec metadata for one
//! registry protocol. The trait is the seam the orchestration layer depends
//! on: built-in variants are selected from configuration, and callers can
//! inject any other implementation for custom or test backends.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;
use crate::spec::Spec;

mod dockerhub;
mod mock;
mod rhcc;

pub use dockerhub::DockerHubAdapter;
pub use mock::MockAdapter;
pub use rhcc::RhccAdapter;

/// Image label that carries the base64-encoded spec YAML.
pub const SPEC_LABEL: &str = "com.broker.bundle.spec";

/// Backend-specific image listing and spec fetching for one registry.
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Enumerate candidate image names visible to this backend.
    ///
    /// Network and auth failures surface as errors; the call never
    /// partially succeeds silently.
    async fn image_names(&self) -> Result<Vec<String>>;

    /// Retrieve and parse spec metadata for each image.
    ///
    /// Images that are not valid service definitions for this backend are
    /// omitted from the result, so the returned list may be shorter than
    /// the input.
    async fn fetch_specs(&self, images: &[String]) -> Result<Vec<Spec>>;

    /// Configured display name, used for log and error context.
    fn registry_name(&self) -> &str;
}

/// Build the HTTP client shared by the built-in backends.
pub(crate) fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("broker-catalog/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?)
}

/// A v2 image manifest, schema version 1.
///
/// Only the first history entry matters: it embeds the image config JSON
/// whose labels carry the spec payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageManifest {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    #[serde(rename = "v1Compatibility")]
    v1_compatibility: String,
}

#[derive(Debug, Deserialize)]
struct V1Compatibility {
    #[serde(rename = "config", default)]
    config: Option<ImageConfig>,
}

#[derive(Debug, Deserialize)]
struct ImageConfig {
    #[serde(rename = "Labels", default)]
    labels: HashMap<String, String>,
}

impl ImageManifest {
    /// Extract the spec carried in the manifest's label, if any.
    ///
    /// `Ok(None)` means the image is well-formed but not a service bundle
    /// (no spec label); callers skip it without logging an error.
    pub(crate) fn extract_spec(&self, image: &str, tag: &str) -> Result<Option<Spec>> {
        let Some(entry) = self.history.first() else {
            return Ok(None);
        };

        let compat: V1Compatibility = serde_json::from_str(&entry.v1_compatibility)?;
        let Some(encoded) = compat
            .config
            .as_ref()
            .and_then(|c| c.labels.get(SPEC_LABEL))
        else {
            return Ok(None);
        };

        let raw = general_purpose::STANDARD.decode(encoded)?;
        let mut spec = Spec::from_yaml(&String::from_utf8_lossy(&raw))?;
        spec.image = format!("{image}:{tag}");
        Ok(Some(spec))
    }
}
