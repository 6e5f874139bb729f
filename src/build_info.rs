//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_string_mentions_package_version() {
        assert!(BUILD_VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(BUILD_VERSION.contains(BUILD_DATE));
    }
}
