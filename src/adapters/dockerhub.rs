//! Public hub adapter
//!
//! Enumerates an organization's repositories through the hub API (JWT
//! login, paged listing) and fetches spec metadata through the registry
//! manifest endpoint with a per-repository pull token.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{http_client, ImageManifest, RegistryAdapter};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::spec::Spec;

const HUB_URL: &str = "https://hub.docker.com";
const AUTH_URL: &str = "https://auth.docker.io/token";
const REGISTRY_URL: &str = "https://registry.hub.docker.com";

pub struct DockerHubAdapter {
    client: reqwest::Client,
    config: RegistryConfig,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct PullTokenResponse {
    token: String,
}

/// One page of `/v2/repositories/<org>/`
#[derive(Debug, Deserialize)]
struct RepositoryPage {
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    results: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    name: String,
}

impl DockerHubAdapter {
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            config,
        })
    }

    /// Registry host for manifest fetches; configurable for mirrors.
    fn registry_url(&self) -> &str {
        if self.config.url.is_empty() {
            REGISTRY_URL
        } else {
            &self.config.url
        }
    }

    /// Log in to the hub API and return the session JWT.
    async fn login(&self) -> Result<String> {
        let url = format!("{HUB_URL}/v2/users/login/");
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": self.config.user,
                "password": self.config.pass,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RegistryError::Http {
                status: response.status(),
                url,
            });
        }

        let login: LoginResponse = response.json().await?;
        Ok(login.token)
    }

    /// Obtain a pull-scoped token for one repository.
    async fn pull_token(&self, image: &str) -> Result<String> {
        let scope = format!("repository:{image}:pull");
        let response = self
            .client
            .get(AUTH_URL)
            .query(&[("service", "registry.docker.io"), ("scope", scope.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RegistryError::Http {
                status: response.status(),
                url: AUTH_URL.to_string(),
            });
        }

        let token: PullTokenResponse = response.json().await?;
        Ok(token.token)
    }

    async fn fetch_manifest(&self, image: &str) -> Result<Option<ImageManifest>> {
        let token = self.pull_token(image).await?;
        let url = format!(
            "{}/v2/{}/manifests/{}",
            self.registry_url(),
            image,
            self.config.tag
        );
        let response = self.client.get(&url).bearer_auth(token).send().await?;

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
impl RegistryAdapter for DockerHubAdapter {
    async fn image_names(&self) -> Result<Vec<String>> {
        let token = self.login().await?;

        let mut names = Vec::new();
        let mut next = Some(format!(
            "{HUB_URL}/v2/repositories/{}/?page_size=100",
            self.config.org
        ));

        while let Some(url) = next {
            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("JWT {token}"))
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(RegistryError::Http {
                    status: response.status(),
                    url,
                });
            }

            let page: RepositoryPage = response.json().await?;
            names.extend(
                page.results
                    .into_iter()
                    .map(|r| format!("{}/{}", self.config.org, r.name)),
            );
            next = page.next;
        }

        Ok(names)
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
