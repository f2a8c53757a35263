//! Major-version compatibility checking
//!
//! Spec schema versions are dotted pairs like "1.0". Compatibility is a
//! per-major-version contract: only the leading integer is compared against
//! an inclusive range, and anything that fails to parse is incompatible.

/// Check a candidate version against an inclusive major-version range.
///
/// All three inputs must be exactly two dot-separated non-negative
/// integers. A parse failure on any of them yields `false` rather than an
/// error; malformed data is always treated as incompatible. The minor
/// component is parsed to enforce the shape but does not affect the
/// outcome.
pub fn is_compatible(version: &str, min_version: &str, max_version: &str) -> bool {
    match (
        parse_version(version),
        parse_version(min_version),
        parse_version(max_version),
    ) {
        (Some((major, _)), Some((min_major, _)), Some((max_major, _))) => {
            min_major <= major && major <= max_major
        }
        _ => false,
    }
}

/// Parse a "major.minor" pair. Any other shape is `None`.
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let (major, minor) = version.split_once('.')?;
    Some((parse_component(major)?, parse_component(minor)?))
}

fn parse_component(component: &str) -> Option<u32> {
    // str::parse would accept a leading '+'; versions are plain digits only.
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_bounds_accept_exact_major() {
        assert!(is_compatible("1.0", "1.0", "1.0"));
    }

    #[test]
    fn major_above_range_is_rejected() {
        assert!(!is_compatible("2.0", "1.0", "1.0"));
    }

    #[test]
    fn minor_component_is_ignored() {
        assert!(is_compatible("1.10", "1.0", "1.0"));
        assert!(is_compatible("2.4", "1.0", "2.0"));
        assert!(is_compatible("1.10", "1.0", "2.0"));
    }

    #[test]
    fn major_below_range_is_rejected() {
        assert!(!is_compatible("0.6", "1.0", "2.0"));
        assert!(!is_compatible("2.5", "3.0", "4.0"));
    }

    #[test]
    fn wide_range_accepts_interior_major() {
        assert!(is_compatible("2.5", "1.0", "3.0"));
    }

    #[test]
    fn three_components_fail_to_parse() {
        assert!(!is_compatible("0.1.0", "1.0", "1.0"));
    }

    #[test]
    fn single_component_fails_to_parse() {
        assert!(!is_compatible("1", "1.0", "3.0"));
    }

    #[test]
    fn non_numeric_components_fail_to_parse() {
        assert!(!is_compatible("a.b", "1.0", "1.0"));
        assert!(!is_compatible("1.x", "1.0", "1.0"));
        assert!(!is_compatible("", "1.0", "1.0"));
        assert!(!is_compatible("1.0", "", "1.0"));
        assert!(!is_compatible("-1.0", "1.0", "1.0"));
        assert!(!is_compatible("+1.0", "1.0", "1.0"));
    }

    #[test]
    fn malformed_bounds_are_incompatible() {
        assert!(!is_compatible("1.0", "1", "1.0"));
        assert!(!is_compatible("1.0", "1.0", "1.0.0"));
    }
}
