//! What a run does to the output tree, canonical and overridden.

use std::fs;

use stone_clientgen::interface::config::CANONICAL_OUTPUT_DIR;
use stone_clientgen::GenerateConfig;

use crate::common::TestEnv;

#[test]
fn test_default_run_clears_canonical_output() {
    let env = TestEnv::new();
    fs::create_dir_all(env.canonical_output().join("Routes")).unwrap();
    fs::write(env.canonical_output().join("Routes/DBStale.m"), "old").unwrap();

    env.run(GenerateConfig::default()).unwrap();

    assert!(env.canonical_output().is_dir());
    assert_eq!(fs::read_dir(env.canonical_output()).unwrap().count(), 0);
}

#[test]
fn test_run_creates_missing_output_directory() {
    let env = TestEnv::new();
    assert!(!env.canonical_output().exists());

    env.run(GenerateConfig::default()).unwrap();
    assert!(env.canonical_output().is_dir());
}

#[test]
fn test_override_keeps_existing_files() {
    let env = TestEnv::new();
    let output = env.base().join("staging/generated");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("keep.m"), "mine").unwrap();

    let config = GenerateConfig {
        output_path: Some("staging/generated".into()),
        ..Default::default()
    };
    env.run(config).unwrap();

    assert!(output.join("keep.m").exists());

    // The override is also what stone gets pointed at.
    let types = &env.recorded_invocations()[0];
    assert_eq!(types[9], output.display().to_string());
}

#[test]
fn test_override_is_created_when_missing() {
    let env = TestEnv::new();
    let output = env.base().join("staging/generated");

    let config = GenerateConfig {
        output_path: Some("staging/generated".into()),
        ..Default::default()
    };
    env.run(config).unwrap();
    assert!(output.is_dir());
}

#[test]
fn test_explicit_canonical_path_is_still_cleared() {
    let env = TestEnv::new();
    fs::create_dir_all(env.canonical_output()).unwrap();
    fs::write(env.canonical_output().join("DBStale.m"), "old").unwrap();

    let config = GenerateConfig {
        output_path: Some(CANONICAL_OUTPUT_DIR.into()),
        ..Default::default()
    };
    env.run(config).unwrap();

    assert!(!env.canonical_output().join("DBStale.m").exists());
}

#[test]
fn test_format_target_override() {
    let env = TestEnv::new();
    let config = GenerateConfig {
        format_output_path: Some("Source/ObjectiveDropboxOfficial".into()),
        ..Default::default()
    };
    env.run(config).unwrap();

    assert_eq!(
        env.formatted_targets(),
        vec![env
            .base()
            .join("Source/ObjectiveDropboxOfficial")
            .display()
            .to_string()]
    );
}
