//! Integration tests for `CSSGUARD_*` environment overrides
//!
//! Kept in their own test binary: the process environment is shared by every
//! test in a binary, and the other suites expect it free of `CSSGUARD_*` keys.

use camino::Utf8PathBuf;
use cssguard::config::ConfigManager;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_process_environment_overrides_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let manager = ConfigManager::new(dir.join("cssguard.json"), dir.join("cssguard.yaml"));
    fs::write(
        manager.settings_path(),
        "ignore:\n  - from-file\nunused_display_limit: 9\n",
    )
    .unwrap();

    // SAFETY: this is the only test in this binary, so nothing reads the
    // environment concurrently.
    unsafe {
        std::env::set_var("CSSGUARD_IGNORE", "js-a,js-b");
        std::env::set_var("CSSGUARD_REDUNDANCY_THRESHOLD", "90");
    }

    let settings = manager.load_settings().unwrap();

    unsafe {
        std::env::remove_var("CSSGUARD_IGNORE");
        std::env::remove_var("CSSGUARD_REDUNDANCY_THRESHOLD");
    }

    assert_eq!(settings.ignore, vec!["js-a", "js-b"]);
    assert_eq!(settings.redundancy_threshold, 90.0);
    assert_eq!(settings.unused_display_limit, 9);
}
