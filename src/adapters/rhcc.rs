//! Container-registry catalog adapter
//!
//! Talks to an RHCC-style registry: image enumeration via the v1 search
//! API, spec metadata via v2 image manifests.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{http_client, ImageManifest, RegistryAdapter};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::spec::Spec;

pub struct RhccAdapter {
    client: reqwest::Client,
    config: RegistryConfig,
}

/// Response from `/v1/search`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
}

impl RhccAdapter {
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            config,
        })
    }

    async fn fetch_manifest(&self, image: &str) -> Result<Option<ImageManifest>> {
        let url = format!(
            "{}/v2/{}/manifests/{}",
            self.config.url, image, self.config.tag
        );
        let response = self.client.get(&url).send().await?;

        // An image with no manifest at the configured tag is not a
        // service bundle, only other failures are worth surfacing.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(RegistryError::Http {
                status: response.status(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[async_trait]
impl RegistryAdapter for RhccAdapter {
    async fn image_names(&self) -> Result<Vec<String>> {
        let url = format!("{}/v1/search", self.config.url);
        let response = self.client.get(&url).query(&[("q", "*")]).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::Http {
                status: response.status(),
                url,
            });
        }

        let search: SearchResponse = response.json().await?;
        Ok(search.results.into_iter().map(|r| r.name).collect())
    }

    async fn fetch_specs(&self, images: &[String]) -> Result<Vec<Spec>> {
        let mut specs = Vec::new();

        for image in images {
            let manifest = match self.fetch_manifest(image).await {
                Ok(Some(manifest)) => manifest,
                Ok(None) => {
                    debug!(registry = %self.config.name, image = %image, "no manifest at configured tag");
                    continue;
                }
                Err(RegistryError::Transport(err)) => return Err(RegistryError::Transport(err)),
                Err(err) => {
                    warn!(registry = %self.config.name, image = %image, %err, "skipping unreadable manifest");
                    continue;
                }
            };

            match manifest.extract_spec(image, &self.config.tag) {
                Ok(Some(spec)) => specs.push(spec),
                Ok(None) => {
                    debug!(registry = %self.config.name, image = %image, "image carries no spec label")
                }
                Err(err) => {
                    warn!(registry = %self.config.name, image = %image, %err, "skipping garbled spec payload")
                }
            }
        }

        Ok(specs)
    }

    fn registry_name(&self) -> &str {
        &self.config.name
    }
}
