//! Commit and date stamped in by the build script.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string, e.g. `2026-10-19 (a1b2c3d)`.
pub fn version_line() -> String {
    format!("{} ({})", BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_present() {
        assert!(!BUILD_COMMIT.is_empty());
        // YYYY-MM-DD unless overridden
        assert!(BUILD_DATE.len() == 10 || BUILD_DATE == "unknown");
    }

    #[test]
    fn test_version_line() {
        let line = version_line();
        assert!(line.starts_with(BUILD_DATE));
        assert!(line.contains(BUILD_COMMIT));
    }
}
