//! Broker catalog - Registry discovery and validation
//!
//! This crate discovers deployable service definitions ("specs") across
//! independently-configured image registries and validates them before
//! they reach the broker's catalog.
//!
//! # Overview
//!
//! The broker bootstrap constructs one [`Registry`] per configured
//! backend. Each discovery cycle:
//! - lists candidate image names through the backend's adapter
//! - filters them with the operator's allow/deny glob rules
//! - fetches spec metadata for the survivors
//! - drops any spec that has no plans, an incompatible or unparseable
//!   version, or an unsupported runtime marker
//!
//! Whether an adapter error aborts the whole sync is a per-registry
//! policy ([`Registry::should_fail`]), so best-effort sources can be
//! skipped while critical ones stay fail-fast.
//!
//! # Architecture
//!
//! ```text
//! broker config (registry.*)
//!     │
//!     ▼
//! Registry ──── NameFilter (allow/deny globs)
//!     │
//!     ├── RhccAdapter      ← v1 search + v2 manifests
//!     ├── DockerHubAdapter ← hub login + paged listing
//!     ├── MockAdapter      ← in-memory / YAML fixture
//!     └── injected impl    ← any RegistryAdapter
//!     │
//!     ▼
//! validated specs → catalog merge (caller)
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod filter;
pub mod registry;
pub mod spec;
pub mod version;

pub use adapters::{DockerHubAdapter, MockAdapter, RegistryAdapter, RhccAdapter};
pub use config::{BackendKind, RegistryConfig};
pub use error::{RegistryError, Result};
pub use filter::NameFilter;
pub use registry::Registry;
pub use spec::{AsyncMode, ParameterDescriptor, Plan, Spec};
pub use version::is_compatible;
