//! Deterministic in-memory adapter
//!
//! Serves a fixed set of images and specs with no network involved.
//! Useful as a configured backend for demos (specs loaded from a local
//! YAML fixture) and as the injected adapter in tests.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use super::RegistryAdapter;
use crate::error::Result;
use crate::spec::Spec;

pub struct MockAdapter {
    name: String,
    images: Vec<String>,
    specs: Vec<Spec>,
}

/// Fixture file shape: a `specs` list of service definitions.
#[derive(Debug, Deserialize)]
struct MockFixture {
    #[serde(default)]
    specs: Vec<Spec>,
}

impl MockAdapter {
    pub fn new(name: impl Into<String>, images: Vec<String>, specs: Vec<Spec>) -> Self {
        Self {
            name: name.into(),
            images,
            specs,
        }
    }

    /// An adapter with nothing to serve.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), Vec::new())
    }

    /// Load specs from a YAML fixture file; images are the specs' names.
    pub fn from_file(name: impl Into<String>, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let fixture: MockFixture = serde_yaml_ng::from_str(&content)?;
        let images = fixture.specs.iter().map(|s| s.name.clone()).collect();
        Ok(Self::new(name, images, fixture.specs))
    }
}

#[async_trait]
impl RegistryAdapter for MockAdapter {
    async fn image_names(&self) -> Result<Vec<String>> {
        Ok(self.images.clone())
    }

    async fn fetch_specs(&self, images: &[String]) -> Result<Vec<Spec>> {
        // Mirrors a real backend: only specs whose image survived
        // filtering are returned.
        Ok(self
            .specs
            .iter()
            .filter(|s| images.contains(&s.name) || images.contains(&s.image))
            .cloned()
            .collect())
    }

    fn registry_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn loads_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
specs:
  - id: mock-1
    name: etherpad
    image: examples/etherpad
    version: "1.0"
    runtime: 1
    plans:
      - name: dev
"#
        )
        .unwrap();

        let adapter = MockAdapter::from_file("mock", file.path()).unwrap();
        let images = adapter.image_names().await.unwrap();
        assert_eq!(images, vec!["etherpad"]);

        let specs = adapter.fetch_specs(&images).await.unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].plans.len(), 1);
    }

    #[tokio::test]
    async fn empty_adapter_serves_nothing() {
        let adapter = MockAdapter::empty("mock");
        assert!(adapter.image_names().await.unwrap().is_empty());
        assert!(adapter.fetch_specs(&[]).await.unwrap().is_empty());
        assert_eq!(adapter.registry_name(), "mock");
    }

    #[tokio::test]
    async fn fetch_respects_filtered_image_list() {
        let spec_a = Spec {
            name: "a".to_string(),
            ..Default::default()
        };
        let spec_b = Spec {
            name: "b".to_string(),
            ..Default::default()
        };
        let adapter = MockAdapter::new(
            "mock",
            vec!["a".to_string(), "b".to_string()],
            vec![spec_a, spec_b],
        );

        let specs = adapter.fetch_specs(&["b".to_string()]).await.unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "b");
    }
}
