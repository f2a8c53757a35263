//! Image name filtering
//!
//! Operators scope a registry to the images they actually want in the
//! catalog with glob-style allow and deny patterns. Filtering happens
//! before any metadata is fetched, so a tight filter also cuts the number
//! of manifest requests a discovery cycle makes.

use glob::Pattern;

use crate::error::Result;

/// Allow/deny rule set applied to raw image names.
///
/// The zero-value filter (no patterns) matches everything. Deny patterns
/// take precedence over allow patterns, so an operator can always exclude
/// a known-bad image regardless of how broad the allow rules are.
#[derive(Debug, Default)]
pub struct NameFilter {
    allow: Vec<Pattern>,
    deny: Vec<Pattern>,
}

impl NameFilter {
    /// Compile a filter from allow and deny glob patterns.
    ///
    /// A pattern that fails to compile is a configuration error surfaced
    /// at registry construction, not something to discover mid-discovery.
    pub fn new(allow: &[String], deny: &[String]) -> Result<Self> {
        Ok(Self {
            allow: compile(allow)?,
            deny: compile(deny)?,
        })
    }

    /// Whether an image name survives the filter.
    pub fn matches(&self, name: &str) -> bool {
        if self.deny.iter().any(|p| p.matches(name)) {
            return false;
        }
        if self.allow.is_empty() {
            return true;
        }
        self.allow.iter().any(|p| p.matches(name))
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(Into::into))
        .collect()
}
