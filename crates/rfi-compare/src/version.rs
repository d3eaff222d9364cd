//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version line printed with verbose reports.
#[must_use]
pub fn full_version() -> String {
    format!("rfi-compare {}", version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_not_empty() {
        assert!(!version().is_empty());
        assert!(full_version().starts_with("rfi-compare "));
    }
}
