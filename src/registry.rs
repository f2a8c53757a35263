//! Registry orchestration
//!
//! A `Registry` binds one backend configuration to one adapter and one
//! name filter, and drives a discovery cycle: list images, filter them by
//! name, fetch spec metadata, and validate what comes back. Registries
//! share no mutable state, so a caller syncing several backends can run
//! their `load_specs` calls concurrently and merge the results afterwards.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::adapters::{DockerHubAdapter, MockAdapter, RegistryAdapter, RhccAdapter};
use crate::config::{BackendKind, RegistryConfig};
use crate::error::{RegistryError, Result};
use crate::filter::NameFilter;
use crate::spec::Spec;
use crate::version::is_compatible;

pub struct Registry {
    config: RegistryConfig,
    adapter: Box<dyn RegistryAdapter>,
    filter: NameFilter,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Assemble a registry from its configuration.
    ///
    /// An injected adapter binds directly and bypasses `type` dispatch;
    /// otherwise the configured backend kind selects a built-in adapter.
    /// A bad registry name or filter pattern is a recoverable error, while
    /// an unrecognized backend kind with no injected adapter is fatal
    /// (`RegistryError::is_fatal`) and must halt broker startup.
    pub fn new(config: RegistryConfig, adapter: Option<Box<dyn RegistryAdapter>>) -> Result<Self> {
        config.validate_name()?;

        let adapter = match adapter {
            Some(adapter) => adapter,
            None => build_adapter(&config)?,
        };

        let filter = NameFilter::new(&config.white_list, &config.black_list)?;

        Ok(Self {
            config,
            adapter,
            filter,
        })
    }

    /// Run one discovery cycle.
    ///
    /// Returns the validated specs and the number of images that survived
    /// name filtering. Adapter errors propagate immediately; a healthy
    /// backend with zero valid specs is not an error. Safe to re-run at
    /// any time: discovery has no side effects on the registry itself.
    pub async fn load_specs(&self) -> Result<(Vec<Spec>, usize)> {
        let images = self.adapter.image_names().await?;

        let filtered: Vec<String> = images
            .into_iter()
            .filter(|name| {
                let keep = self.filter.matches(name);
                if !keep {
                    debug!(registry = %self.config.name, image = %name, "filtered out by name rules");
                }
                keep
            })
            .collect();
        let image_count = filtered.len();

        let fetched = self.adapter.fetch_specs(&filtered).await?;

        let specs: Vec<Spec> = fetched
            .into_iter()
            .filter(|spec| self.validate_spec(spec))
            .collect();

        info!(
            registry = %self.config.name,
            images = image_count,
            specs = specs.len(),
            "discovery cycle complete"
        );

        Ok((specs, image_count))
    }

    /// Whether an error from this registry should abort the catalog sync.
    ///
    /// Pure policy lookup: the configured `fail` flag decides, regardless
    /// of the error's identity.
    pub fn should_fail(&self, err: &RegistryError) -> bool {
        debug!(registry = %self.config.name, %err, "consulting fail policy");
        self.config.fail
    }

    /// Configured registry name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Apply the validation pipeline to one fetched spec.
    ///
    /// Failures are filtering decisions, not errors: the spec is dropped
    /// and the reason logged.
    fn validate_spec(&self, spec: &Spec) -> bool {
        if spec.plans.is_empty() {
            warn!(
                registry = %self.config.name, spec = %spec.name,
                "rejected: spec declares no plans"
            );
            return false;
        }

        if spec.version.is_empty()
            || !is_compatible(&spec.version, &self.config.min_version, &self.config.max_version)
        {
            warn!(
                registry = %self.config.name, spec = %spec.name, version = %spec.version,
                min = %self.config.min_version, max = %self.config.max_version,
                "rejected: incompatible or unparseable spec version"
            );
            return false;
        }

        if spec.runtime < self.config.min_runtime {
            warn!(
                registry = %self.config.name, spec = %spec.name,
                runtime = spec.runtime, floor = self.config.min_runtime,
                "rejected: unsupported runtime"
            );
            return false;
        }

        true
    }
}

/// Construct the built-in adapter the configuration selects.
fn build_adapter(config: &RegistryConfig) -> Result<Box<dyn RegistryAdapter>> {
    let kind = config.backend_kind()?;
    let adapter: Box<dyn RegistryAdapter> = match kind {
        BackendKind::Rhcc => Box::new(RhccAdapter::new(config.clone())?),
        BackendKind::DockerHub => Box::new(DockerHubAdapter::new(config.clone())?),
        BackendKind::Mock => {
            if config.url.is_empty() {
                Box::new(MockAdapter::empty(config.name.clone()))
            } else {
                Box::new(MockAdapter::from_file(
                    config.name.clone(),
                    Path::new(&config.url),
                )?)
            }
        }
    };
    Ok(adapter)
}
