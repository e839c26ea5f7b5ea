//! Command routing without a process boundary

use super::test_utils::mixed_sof;
use clap::Parser;
use framekit::cli::{map_error, Cli, Commands, RunContext};
use framekit::config::FramekitConfig;
use framekit::error::ErrorKind;
use std::path::PathBuf;
use tempfile::TempDir;

fn context(temp: &TempDir, format: &str) -> RunContext {
    let mut config = FramekitConfig::default();
    config.host.output_dir = PathBuf::from("products");
    config.output.format = format.to_string();
    RunContext::with_config(temp.path().to_path_buf(), config).unwrap()
}

fn command(args: &[&str]) -> Commands {
    let mut argv = vec!["framekit"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

#[test]
fn test_recipes_json_lists_builtin() {
    let temp_dir = TempDir::new().unwrap();
    let output = context(&temp_dir, "json")
        .execute(&command(&["recipes"]))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["total"], 1);
    assert_eq!(value["recipes"][0]["name"], "frame_groups");
    assert_eq!(value["recipes"][0]["type"], "recipe");
}

#[test]
fn test_params_text_table() {
    let temp_dir = TempDir::new().unwrap();
    let output = context(&temp_dir, "text")
        .execute(&command(&["params", "frame_groups"]))
        .unwrap();
    assert!(output.contains("framekit.frame_groups.min_members"));
    assert!(output.contains("min-members"));
    assert!(output.contains("tag+type"));
}

#[test]
fn test_frames_by_tag_counts() {
    let temp_dir = TempDir::new().unwrap();
    mixed_sof(temp_dir.path());
    let output = context(&temp_dir, "text")
        .execute(&command(&["frames", "input.sof", "--by-tag", "--format", "json"]))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["total"], 7);
    assert_eq!(value["tags"]["BIAS"], 3);
    assert_eq!(value["tags"]["MASTER_DARK"], 1);
}

#[test]
fn test_run_resolves_paths_against_workspace() {
    let temp_dir = TempDir::new().unwrap();
    mixed_sof(temp_dir.path());
    let output = context(&temp_dir, "json")
        .execute(&command(&["run", "frame_groups", "input.sof", "-p", "min-members=2"]))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["products"].as_array().unwrap().len(), 2);
    assert!(temp_dir.path().join("products/bias_group.json").exists());
    assert!(!temp_dir.path().join("products/science_group.json").exists());
}

#[test]
fn test_run_output_dir_flag() {
    let temp_dir = TempDir::new().unwrap();
    mixed_sof(temp_dir.path());
    let output = context(&temp_dir, "text")
        .execute(&command(&[
            "run",
            "frame_groups",
            "input.sof",
            "--output-dir",
            "elsewhere",
        ]))
        .unwrap();
    assert!(output.contains("BIAS_GROUP"));
    assert!(temp_dir.path().join("elsewhere/flat_group.json").exists());
}

#[test]
fn test_run_errors_map_to_kind_prefix() {
    let temp_dir = TempDir::new().unwrap();
    mixed_sof(temp_dir.path());
    let ctx = context(&temp_dir, "text");

    let err = ctx
        .execute(&command(&["run", "frame_groups", "input.sof", "-p", "min-members"]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInput);

    let err = ctx
        .execute(&command(&["run", "no_such_recipe", "input.sof"]))
        .unwrap_err();
    assert!(map_error(&err).starts_with("[DATA_NOT_FOUND]"));
}

#[test]
fn test_config_command_prints_effective_config() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&temp_dir, "text");
    let output = ctx.execute(&command(&["config"])).unwrap();
    assert!(output.contains("output_dir = \"products\""));

    let output = ctx
        .execute(&command(&["config", "--format", "json"]))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["output"]["format"], "text");
}

#[test]
fn test_unknown_format_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let err = context(&temp_dir, "text")
        .execute(&command(&["recipes", "--format", "xml"]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInput);
}
