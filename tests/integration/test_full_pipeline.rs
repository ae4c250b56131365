//! End-to-end runs over a faked checkout: invocation count, order, and
//! the exact command lines handed to stone.

use std::fs;

use stone_clientgen::interface::config::SOURCE_DIR;
use stone_clientgen::GenerateConfig;

use crate::common::{backend_of, value_after, TestEnv};

#[test]
fn test_one_types_pass_then_three_clients() {
    let env = TestEnv::new();
    env.run(GenerateConfig::default()).unwrap();

    let invocations = env.recorded_invocations();
    let backends: Vec<&str> = invocations.iter().map(|argv| backend_of(argv)).collect();
    assert_eq!(
        backends,
        vec!["obj_c_types", "obj_c_client", "obj_c_client", "obj_c_client"]
    );
}

#[test]
fn test_clients_run_in_audience_order() {
    let env = TestEnv::new();
    env.run(GenerateConfig::default()).unwrap();

    let invocations = env.recorded_invocations();
    let audiences: Vec<&str> = invocations[1..]
        .iter()
        .map(|argv| value_after(argv, "-w"))
        .collect();
    assert_eq!(audiences, vec!["user", "team", "app"]);
}

#[test]
fn test_types_invocation_shape() {
    let env = TestEnv::new();
    env.run(GenerateConfig::default()).unwrap();

    let invocations = env.recorded_invocations();
    let types = &invocations[0];

    assert_eq!(
        &types[..9],
        [
            "-m",
            "stone.cli",
            "-a",
            "host",
            "-a",
            "style",
            "-a",
            "auth",
            "obj_c_types",
        ]
    );
    assert_eq!(types[9], env.canonical_output().display().to_string());
    assert_eq!(
        types[10],
        env.base().join("spec/files.stone").display().to_string()
    );
    assert_eq!(&types[11..], ["--", "-d"]);
}

#[test]
fn test_discovered_specs_ride_every_invocation_sorted() {
    let env = TestEnv::new();
    env.write_spec("async.stone", "namespace async\n");
    env.write_spec("users.stone", "namespace users\n");

    env.run(GenerateConfig::default()).unwrap();

    let expected: Vec<String> = ["async.stone", "files.stone", "users.stone"]
        .iter()
        .map(|name| env.base().join("spec").join(name).display().to_string())
        .collect();

    let invocations = env.recorded_invocations();
    assert_eq!(invocations.len(), 4);
    for argv in &invocations {
        let backend = argv.iter().position(|a| a.starts_with("obj_c_")).unwrap();
        assert_eq!(&argv[backend + 2..backend + 5], expected.as_slice());
    }
}

#[test]
fn test_explicit_specs_keep_given_order() {
    let env = TestEnv::new();
    env.write_spec("users.stone", "namespace users\n");

    let config = GenerateConfig {
        specs: vec!["spec/users.stone".into(), "spec/files.stone".into()],
        ..Default::default()
    };
    env.run(config).unwrap();

    let types = &env.recorded_invocations()[0];
    assert_eq!(
        types[10],
        env.base().join("spec/users.stone").display().to_string()
    );
    assert_eq!(
        types[11],
        env.base().join("spec/files.stone").display().to_string()
    );
}

#[test]
fn test_allowlist_rides_every_invocation() {
    let env = TestEnv::new();
    let config = GenerateConfig {
        route_whitelist: Some("allowlist.json".into()),
        ..Default::default()
    };
    env.run(config).unwrap();

    let invocations = env.recorded_invocations();
    assert_eq!(invocations.len(), 4);
    for argv in &invocations {
        assert_eq!(value_after(argv, "-r"), "allowlist.json");

        let allowlist = argv.iter().position(|a| a == "-r").unwrap();
        let backend = argv.iter().position(|a| a.starts_with("obj_c_")).unwrap();
        assert!(allowlist < backend);
    }
}

#[test]
fn test_exclusion_flag_extends_the_types_tail() {
    let env = TestEnv::new();
    let config = GenerateConfig {
        exclude_from_analysis: true,
        ..Default::default()
    };
    env.run(config).unwrap();

    let types = &env.recorded_invocations()[0];
    assert_eq!(&types[types.len() - 3..], ["--", "-d", "-e"]);
}

#[test]
fn test_disabled_docs_drop_the_types_tail() {
    let env = TestEnv::new();
    let config = GenerateConfig {
        documentation: false,
        ..Default::default()
    };
    env.run(config).unwrap();

    let types = &env.recorded_invocations()[0];
    assert_eq!(backend_of(types), "obj_c_types");
    assert!(!types.contains(&"--".to_string()));
}

#[test]
fn test_formatter_receives_source_root() {
    let env = TestEnv::new();
    env.run(GenerateConfig::default()).unwrap();

    assert_eq!(
        env.formatted_targets(),
        vec![env.base().join(SOURCE_DIR).display().to_string()]
    );
}

#[test]
fn test_two_runs_issue_identical_commands() {
    let env = TestEnv::new();
    env.run(GenerateConfig::default()).unwrap();
    let first = env.recorded_invocations();

    fs::remove_file(env.interpreter_log()).unwrap();
    env.run(GenerateConfig::default()).unwrap();

    assert_eq!(env.recorded_invocations(), first);
}

#[test]
fn test_verbose_run_succeeds_too() {
    let env = TestEnv::new();
    let config = GenerateConfig {
        verbose: true,
        ..Default::default()
    };
    env.run(config).unwrap();
    assert_eq!(env.recorded_invocations().len(), 4);
}
