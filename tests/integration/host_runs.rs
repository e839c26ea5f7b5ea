//! Host runs from set-of-frames files

use super::test_utils::{host_config, mixed_sof, no_env, write_sof};
use framekit::config::HostConfig;
use framekit::error::ErrorKind;
use framekit::frame::FrameGroup;
use framekit::host::Host;
use framekit::recipes::frame_groups::{self, PARAM_GROUP_BY};
use tempfile::TempDir;

fn overrides(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_run_sof_writes_one_manifest_per_tag() {
    let temp_dir = TempDir::new().unwrap();
    let sof = mixed_sof(temp_dir.path());
    let host = Host::new(host_config(&temp_dir)).with_env_lookup(no_env);

    let report = host.run_sof(frame_groups::NAME, &sof, &[]).unwrap();

    assert_eq!(report.recipe, frame_groups::NAME);
    assert_eq!(report.products.len(), 3);
    assert_eq!(report.frames.len(), 10);
    assert_eq!(report.frames.count_tags("BIAS_GROUP"), 1);

    let products = temp_dir.path().join("products");
    for name in ["bias_group.json", "flat_group.json", "science_group.json"] {
        assert!(products.join(name).exists(), "missing {}", name);
    }

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(products.join("bias_group.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["tag"], "BIAS");
    assert_eq!(manifest["members"].as_array().unwrap().len(), 3);
}

#[test]
fn test_product_headers_list_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let sof = mixed_sof(temp_dir.path());
    let host = Host::new(host_config(&temp_dir)).with_env_lookup(no_env);

    let report = host
        .run_sof(frame_groups::NAME, &sof, &overrides(&[("min-members", "3")]))
        .unwrap();
    assert_eq!(report.products.len(), 1);

    let header = &report.products[0].header;
    assert_eq!(header.get_string("ESO PRO CATG"), Some("BIAS_GROUP"));
    assert_eq!(header.get_string("ESO PRO TYPE"), Some("REDUCED"));
    assert_eq!(header.get_string("ESO PRO REC1 PIPE ID"), Some("framekit/test"));
    assert_eq!(header.get_string("ESO PRO REC1 RAW1 NAME"), Some("bias_1.fits"));
    assert_eq!(header.get_string("ESO PRO REC1 RAW6 CATG"), Some("SCIENCE"));
    assert_eq!(header.get_string("ESO PRO REC1 CAL1 CATG"), Some("MASTER_DARK"));
    assert!(!header.contains("ESO PRO REC1 CAL2 NAME"));
    assert_eq!(header.get_string("ESO PRO REC1 PARAM1 NAME"), Some("min-members"));
    assert_eq!(header.get_string("ESO PRO REC1 PARAM1 VALUE"), Some("3"));
    assert_eq!(header.get_string("ESO PRO REC1 PARAM2 VALUE"), Some("tag"));
    assert!(header.contains("DATE"));
}

#[test]
fn test_group_by_type_splits_tags() {
    let temp_dir = TempDir::new().unwrap();
    let sof = write_sof(
        temp_dir.path(),
        "typed.sof",
        &["a.fits FLAT RAW", "b.fits FLAT RAW"],
    );
    let host = Host::new(host_config(&temp_dir)).with_env_lookup(|key| {
        (key == "FRAMEKIT_GROUP_BY").then(|| "tag+type".to_string())
    });

    let report = host.run_sof(frame_groups::NAME, &sof, &[]).unwrap();
    assert_eq!(
        report.parameters.find(PARAM_GROUP_BY).unwrap().get_string().unwrap(),
        "tag+type"
    );
    assert_eq!(report.products.len(), 1);
    assert!(temp_dir
        .path()
        .join("products")
        .join("flat_none_group.json")
        .exists());
}

#[test]
fn test_run_without_raw_frames_fails_and_tears_down() {
    let temp_dir = TempDir::new().unwrap();
    let sof = write_sof(temp_dir.path(), "calib.sof", &["m.fits MASTER_BIAS CALIB"]);
    let host = Host::new(host_config(&temp_dir)).with_env_lookup(no_env);

    let err = host.run_sof(frame_groups::NAME, &sof, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataNotFound);

    // Each run gets a fresh plugin, so the host stays usable
    let sof = mixed_sof(temp_dir.path());
    assert!(host.run_sof(frame_groups::NAME, &sof, &[]).is_ok());
}

#[test]
fn test_missing_sof_and_missing_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let host = Host::new(host_config(&temp_dir)).with_env_lookup(no_env);

    let err = host
        .run_sof(frame_groups::NAME, &temp_dir.path().join("absent.sof"), &[])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);

    let strict = Host::new(HostConfig {
        check_sof_exists: true,
        ..host_config(&temp_dir)
    })
    .with_env_lookup(no_env);
    let sof = mixed_sof(temp_dir.path());
    let err = strict.run_sof(frame_groups::NAME, &sof, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn test_inputs_are_not_reported_as_products() {
    let temp_dir = TempDir::new().unwrap();
    let sof = write_sof(
        temp_dir.path(),
        "with_product.sof",
        &["old_group.json BIAS_GROUP PRODUCT", "b.fits BIAS RAW"],
    );
    let host = Host::new(host_config(&temp_dir)).with_env_lookup(no_env);

    let report = host.run_sof(frame_groups::NAME, &sof, &[]).unwrap();
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.frames.count_tags("BIAS_GROUP"), 2);
    assert!(report
        .products
        .iter()
        .all(|p| p.frame.group() == FrameGroup::Product && p.frame.filename() != Some("old_group.json")));
}
