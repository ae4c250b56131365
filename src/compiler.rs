//! Subprocess plumbing for the stone compiler.
//!
//! Stone is invoked as `python3 -m stone.cli` from inside its own clone,
//! once for type emission and once per audience for client emission. Argv
//! assembly is separated from execution so the exact command lines stay
//! testable without spawning anything.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

use crate::audience::{EmitFlags, GenerationRequest};
use crate::interface::output::Logger;

const PYTHON: &str = "python3";
const STONE_MODULE: &str = "stone.cli";
/// Spec attribute extensions every invocation enables.
const ATTRIBUTE_EXTENSIONS: [&str; 3] = ["host", "style", "auth"];
const TYPES_BACKEND: &str = "obj_c_types";
const CLIENT_BACKEND: &str = "obj_c_client";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{description} failed with {status}{}", captured(.stdout, .stderr))]
    ExitFailure {
        description: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

pub(crate) fn captured(stdout: &str, stderr: &str) -> String {
    let mut rendered = String::new();
    if !stdout.trim().is_empty() {
        rendered.push_str(&format!("\nstdout: {}", stdout.trim_end()));
    }
    if !stderr.trim().is_empty() {
        rendered.push_str(&format!("\nstderr: {}", stderr.trim_end()));
    }
    rendered
}

pub struct StoneCompiler {
    python: OsString,
    stone_path: PathBuf,
    route_whitelist: Option<PathBuf>,
    logger: Logger,
}

impl StoneCompiler {
    pub fn new(stone_path: PathBuf, route_whitelist: Option<PathBuf>, logger: Logger) -> Self {
        Self {
            python: OsString::from(PYTHON),
            stone_path,
            route_whitelist,
            logger,
        }
    }

    /// Use a different interpreter to launch stone with.
    pub fn with_python(mut self, python: impl Into<OsString>) -> Self {
        self.python = python.into();
        self
    }

    /// The invariant argument prefix: module selection, attribute
    /// extensions, and the opaque allow-list filter when one is set.
    fn prefix(&self) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec!["-m".into(), STONE_MODULE.into()];
        for extension in ATTRIBUTE_EXTENSIONS {
            argv.push("-a".into());
            argv.push(extension.into());
        }
        if let Some(allowlist) = &self.route_whitelist {
            argv.push("-r".into());
            argv.push(allowlist.as_os_str().to_os_string());
        }
        argv
    }

    /// Arguments for one type-emission run. The documentation and
    /// exclusion toggles ride only this backend; with both off the
    /// emitter-flag section disappears entirely.
    pub fn types_argv(
        &self,
        output_path: &Path,
        spec_paths: &[PathBuf],
        flags: EmitFlags,
    ) -> Vec<OsString> {
        let mut argv = self.prefix();
        argv.push(TYPES_BACKEND.into());
        argv.push(output_path.as_os_str().to_os_string());
        argv.extend(spec_paths.iter().map(|p| p.as_os_str().to_os_string()));

        if flags.documentation || flags.exclude_from_analysis {
            argv.push("--".into());
            if flags.documentation {
                argv.push("-d".into());
            }
            if flags.exclude_from_analysis {
                argv.push("-e".into());
            }
        }
        argv
    }

    /// Arguments for one audience's client emission.
    pub fn client_argv(&self, request: &GenerationRequest) -> Vec<OsString> {
        let mut argv = self.prefix();
        argv.push(CLIENT_BACKEND.into());
        argv.push(request.output_path.as_os_str().to_os_string());
        argv.extend(request.spec_paths.iter().map(|p| p.as_os_str().to_os_string()));

        argv.push("--".into());
        for (flag, value) in [
            ("-w", request.scope.audience.wire_name()),
            ("-m", request.scope.method_family),
            ("-c", request.scope.client_type),
            ("-t", request.scope.transport_type),
        ] {
            argv.push(flag.into());
            argv.push(value.into());
        }
        argv.push("-y".into());
        argv.push(request.client_args.as_str().into());
        argv.push("-z".into());
        argv.push(request.style_to_request.as_str().into());
        argv
    }

    pub fn emit_types(
        &self,
        output_path: &Path,
        spec_paths: &[PathBuf],
        flags: EmitFlags,
    ) -> Result<(), ProcessError> {
        let argv = self.types_argv(output_path, spec_paths, flags);
        self.run(argv, "Obj-C type generation")
    }

    pub fn emit_client(&self, request: &GenerationRequest) -> Result<(), ProcessError> {
        let argv = self.client_argv(request);
        let description = format!("{} client generation", request.scope.audience);
        self.run(argv, &description)
    }

    /// Run one stone invocation to completion, capturing both streams.
    /// Stdout on a clean exit is informational and gets logged; a non-zero
    /// exit surfaces with everything the process said.
    fn run(&self, argv: Vec<OsString>, description: &str) -> Result<(), ProcessError> {
        self.logger.verbose(&format!(
            "Running: {} {}",
            self.python.to_string_lossy(),
            argv.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        ));

        let output = Command::new(&self.python)
            .args(&argv)
            .current_dir(&self.stone_path)
            .output()
            .map_err(|source| ProcessError::Launch {
                program: self.python.to_string_lossy().into_owned(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ProcessError::ExitFailure {
                description: description.to_string(),
                status: output.status,
                stdout,
                stderr,
            });
        }

        if !stdout.trim().is_empty() {
            self.logger.info(&format!("Output: {}", stdout.trim_end()));
        }
        Ok(())
    }
}
