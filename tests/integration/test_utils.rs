//! Shared fixtures for integration tests

use framekit::config::HostConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `lines` as a set-of-frames file in `dir`.
pub fn write_sof(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Three BIAS, two FLAT and one science frame, all RAW.
pub fn mixed_sof(dir: &Path) -> PathBuf {
    write_sof(
        dir,
        "input.sof",
        &[
            "# calibration inputs",
            "raw/bias_1.fits BIAS RAW",
            "raw/bias_2.fits BIAS RAW",
            "raw/bias_3.fits BIAS RAW",
            "",
            "raw/flat_1.fits FLAT RAW",
            "raw/flat_2.fits FLAT RAW",
            "raw/sci_1.fits SCIENCE RAW",
            "calib/master_dark.fits MASTER_DARK CALIB",
        ],
    )
}

/// Host configuration writing products below a fresh temporary directory.
pub fn host_config(temp: &TempDir) -> HostConfig {
    HostConfig {
        output_dir: temp.path().join("products"),
        pipeline_id: "framekit/test".to_string(),
        ..HostConfig::default()
    }
}

/// Environment lookup that sees nothing.
pub fn no_env(_key: &str) -> Option<String> {
    None
}
