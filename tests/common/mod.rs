#![allow(dead_code)]
/// Common test utilities and helpers
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use stone_clientgen::interface::config::{
    CANONICAL_OUTPUT_DIR, FORMAT_DIR, FORMAT_SCRIPT, SPEC_DIR, STONE_DIR,
};
use stone_clientgen::{GenerateConfig, GenerationDriver, GenerationError};
use tempfile::TempDir;

/// A disposable SDK checkout: spec files, a stone clone stand-in, a
/// formatter script, and a fake interpreter that records every invocation
/// instead of running stone.
pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    /// Scaffold a checkout with one spec file and well-behaved fakes.
    pub fn new() -> Self {
        let env = Self::bare();
        env.write_spec("files.stone", "namespace files\n");
        env
    }

    /// Scaffold a checkout without any spec files.
    pub fn bare() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(SPEC_DIR)).unwrap();
        fs::create_dir_all(temp_dir.path().join(STONE_DIR)).unwrap();
        fs::create_dir_all(temp_dir.path().join("bin")).unwrap();

        let env = Self { temp_dir };
        env.install_interpreter("");
        env.install_formatter("");
        env
    }

    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a spec file into the conventional spec directory.
    pub fn write_spec(&self, name: &str, content: &str) -> PathBuf {
        let path = self.base().join(SPEC_DIR).join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn canonical_output(&self) -> PathBuf {
        self.base().join(CANONICAL_OUTPUT_DIR)
    }

    /// Install the fake interpreter. Each invocation is appended to the
    /// call log, one argument per line, invocations separated by `---`.
    /// `extra` runs after recording and may exit non-zero.
    pub fn install_interpreter(&self, extra: &str) {
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" >> \"{log}\"\nprintf '%s\\n' --- >> \"{log}\"\n{extra}\nexit 0\n",
            log = self.interpreter_log().display(),
            extra = extra,
        );
        self.write_executable(&self.interpreter(), &script);
    }

    /// Replace the interpreter with one that fails whenever its arguments
    /// contain `marker`, still recording the invocation first.
    pub fn fail_interpreter_on(&self, marker: &str, code: i32) {
        self.install_interpreter(&format!(
            "case \"$*\" in *{marker}*) echo 'stone: route parsing failed' >&2; exit {code};; esac"
        ));
    }

    pub fn interpreter(&self) -> PathBuf {
        self.base().join("bin/python3")
    }

    pub fn interpreter_log(&self) -> PathBuf {
        self.base().join("stone_calls.log")
    }

    /// The recorded stone invocations, in order, one argv each.
    pub fn recorded_invocations(&self) -> Vec<Vec<String>> {
        let Ok(content) = fs::read_to_string(self.interpreter_log()) else {
            return Vec::new();
        };

        let mut invocations = Vec::new();
        let mut current = Vec::new();
        for line in content.lines() {
            if line == "---" {
                invocations.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        invocations
    }

    /// Install the formatter script; it records its arguments to the
    /// format log. `extra` runs after recording and may exit non-zero.
    pub fn install_formatter(&self, extra: &str) {
        let dir = self.base().join(FORMAT_DIR);
        fs::create_dir_all(&dir).unwrap();
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" >> \"{log}\"\n{extra}\nexit 0\n",
            log = self.format_log().display(),
            extra = extra,
        );
        self.write_executable(&dir.join(FORMAT_SCRIPT), &script);
    }

    pub fn fail_formatter(&self, code: i32) {
        self.install_formatter(&format!("echo 'clang-format not found' >&2; exit {code}"));
    }

    pub fn format_log(&self) -> PathBuf {
        self.base().join("format_calls.log")
    }

    /// The targets the formatter script was handed, one per invocation.
    pub fn formatted_targets(&self) -> Vec<String> {
        match fs::read_to_string(self.format_log()) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// A driver wired to this checkout and its fake interpreter.
    pub fn driver(&self, config: GenerateConfig) -> GenerationDriver {
        GenerationDriver::new(config)
            .with_base_dir(self.base())
            .with_python(self.interpreter())
    }

    pub fn run(&self, config: GenerateConfig) -> Result<(), GenerationError> {
        self.driver(config).run()
    }

    fn write_executable(&self, path: &Path, content: &str) {
        fs::write(path, content).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// The backend argument of one recorded invocation.
pub fn backend_of(argv: &[String]) -> &str {
    argv.iter()
        .find(|a| a.starts_with("obj_c_"))
        .map(String::as_str)
        .unwrap_or("")
}

/// The value following `flag` in one recorded invocation.
pub fn value_after<'a>(argv: &'a [String], flag: &str) -> &'a str {
    let position = argv
        .iter()
        .position(|a| a == flag)
        .unwrap_or_else(|| panic!("flag {} not present in {:?}", flag, argv));
    &argv[position + 1]
}
