//! Service definition data model
//!
//! Specs are the YAML documents a registry backend attaches to deployable
//! images. A spec names the service, the image that implements it, the
//! schema version it was authored against, and at least one provisioning
//! plan. Everything here is immutable once parsed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// How a service handles asynchronous provisioning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsyncMode {
    Optional,
    Required,
    #[default]
    Unsupported,
}

/// A service definition discovered from a registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Unique identifier assigned by the spec author
    #[serde(default)]
    pub id: String,

    /// Fully-qualified service name
    #[serde(default)]
    pub name: String,

    /// Image reference the service is provisioned from
    #[serde(default)]
    pub image: String,

    /// Declared spec schema version, a dotted pair like "1.0"
    #[serde(default)]
    pub version: String,

    /// Minimum supported runtime marker
    #[serde(default)]
    pub runtime: i32,

    /// Whether instances of this service can be bound
    #[serde(default)]
    pub bindable: bool,

    /// Asynchronous provisioning mode
    #[serde(rename = "async", default)]
    pub async_mode: AsyncMode,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub description: String,

    /// Provisioning plans; a spec with none is never accepted
    #[serde(default)]
    pub plans: Vec<Plan>,
}

/// A named provisioning configuration within a spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub free: bool,

    #[serde(default)]
    pub bindable: bool,

    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

/// Describes one provisioning input accepted by a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,

    #[serde(rename = "type", default)]
    pub param_type: String,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<String>,

    #[serde(default)]
    pub maxlength: Option<u32>,
}

impl Spec {
    /// Parse a spec from a YAML metadata payload.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_spec_yaml() -> &'static str {
        r#"
id: ab094014-b740-495e-b178-946d5aa97ebf
name: etherpad
image: examples/etherpad
version: "1.0"
runtime: 1
bindable: false
async: optional
description: A note taking webapp
tags:
  - latest
  - old-release
plans:
  - name: dev
    description: Basic development plan
    free: true
    bindable: true
    metadata:
      displayName: Development
      cost: "$0.00"
    parameters:
      - name: postgresql_database
        default: admin
        type: string
        title: PostgreSQL Database Name
      - name: postgresql_version
        default: 9.5
        enum: ["9.5", "9.4"]
        type: enum
        title: PostgreSQL Version
"#
    }

    #[test]
    fn parses_full_spec() {
        let spec = Spec::from_yaml(sample_spec_yaml()).unwrap();
        assert_eq!(spec.name, "etherpad");
        assert_eq!(spec.version, "1.0");
        assert_eq!(spec.runtime, 1);
        assert_eq!(spec.async_mode, AsyncMode::Optional);
        assert_eq!(spec.plans.len(), 1);

        let plan = &spec.plans[0];
        assert_eq!(plan.name, "dev");
        assert!(plan.free);
        assert_eq!(plan.parameters.len(), 2);
        assert_eq!(plan.parameters[1].enum_values, vec!["9.5", "9.4"]);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let spec = Spec::from_yaml("name: minimal\nimage: examples/minimal\n").unwrap();
        assert_eq!(spec.version, "");
        assert_eq!(spec.runtime, 0);
        assert_eq!(spec.async_mode, AsyncMode::Unsupported);
        assert!(spec.plans.is_empty());
    }

    #[test]
    fn garbled_yaml_is_an_error() {
        assert!(Spec::from_yaml(": not yaml :::").is_err());
    }
}
