//! The generation pipeline, end to end.
//!
//! One run resolves paths, builds the variant and task tables, stages the
//! output directory, drives stone once for types and once per audience for
//! clients, then formats the result. Every external invocation is
//! synchronous; the first failure wins and nothing after it runs.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::audience::{build_requests, Audience, EmitFlags, GenerationRequest};
use crate::catalog::VariantCatalog;
use crate::compiler::StoneCompiler;
use crate::error::Error;
use crate::interface::config::{GenerateConfig, ResolvedPaths};
use crate::interface::output::{print_generation_summary, Logger, ProgressReporter};
use crate::staging::{run_formatter, OutputStager};
use crate::tasks::TaskBindingTable;

/// Pipeline stages in execution order. Every failure names the stage it
/// happened in, so an aborted run is diagnosable from the error alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvePaths,
    BuildCatalog,
    ClearOutput,
    EmitTypes,
    EmitClient(Audience),
    Format,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ResolvePaths => write!(f, "path resolution"),
            Stage::BuildCatalog => write!(f, "catalog construction"),
            Stage::ClearOutput => write!(f, "output staging"),
            Stage::EmitTypes => write!(f, "type emission"),
            Stage::EmitClient(audience) => write!(f, "{} client emission", audience),
            Stage::Format => write!(f, "formatting"),
        }
    }
}

/// A pipeline failure: which stage, and what went wrong there.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct GenerationError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

/// Sequences one full generation run.
pub struct GenerationDriver {
    config: GenerateConfig,
    logger: Logger,
    base_dir: Option<PathBuf>,
    python: Option<OsString>,
}

impl GenerationDriver {
    pub fn new(config: GenerateConfig) -> Self {
        let logger = Logger::new(config.verbose);
        Self {
            config,
            logger,
            base_dir: None,
            python: None,
        }
    }

    /// Anchor path resolution somewhere other than the working directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Launch stone with a different interpreter.
    pub fn with_python(mut self, python: impl Into<OsString>) -> Self {
        self.python = Some(python.into());
        self
    }

    pub fn run(&self) -> Result<(), GenerationError> {
        let mut reporter = ProgressReporter::new(self.logger.clone(), 8);

        reporter.start_step("Resolving paths");
        let paths = self.step(&mut reporter, Stage::ResolvePaths, || self.resolve())?;
        self.logger.verbose(&format!(
            "Dropbox package path: {}",
            paths.output_path.display()
        ));
        reporter.complete_step(Some(&format!(
            "{} spec file(s), output to {}",
            paths.spec_paths.len(),
            paths.output_path.display()
        )));

        let flags = EmitFlags {
            documentation: self.config.documentation,
            exclude_from_analysis: self.config.exclude_from_analysis,
        };

        reporter.start_step("Preparing generation tables");
        let requests = self.step(&mut reporter, Stage::BuildCatalog, || {
            let catalog = VariantCatalog::standard()?;
            let tasks = TaskBindingTable::standard();
            Ok(build_requests(
                &paths.spec_paths,
                &paths.output_path,
                &catalog,
                &tasks,
                flags,
            )?)
        })?;
        reporter.complete_step(Some(&format!("{} client audiences", requests.len())));

        reporter.start_step("Clearing generated output");
        self.step(&mut reporter, Stage::ClearOutput, || {
            let stager = OutputStager::new(&paths.output_path);
            if paths.is_canonical_output {
                stager.clear_and_recreate()?;
            } else {
                stager.ensure_exists()?;
            }
            Ok(())
        })?;
        reporter.complete_step(if paths.is_canonical_output {
            None
        } else {
            Some("output path overridden, existing files kept")
        });

        let compiler = self.compiler(&paths);

        reporter.start_step("Generating Obj-C types");
        self.step(&mut reporter, Stage::EmitTypes, || {
            compiler.emit_types(&paths.output_path, &paths.spec_paths, flags)?;
            Ok(())
        })?;
        reporter.complete_step(None);

        for request in &requests {
            let audience = request.scope.audience;
            reporter.start_step(&format!("Generating {} client", audience));
            self.step(&mut reporter, Stage::EmitClient(audience), || {
                compiler.emit_client(request)?;
                Ok(())
            })?;
            reporter.complete_step(Some(request.scope.client_type));
        }

        reporter.start_step("Formatting source files");
        self.step(&mut reporter, Stage::Format, || {
            run_formatter(&paths.format_script_dir, &paths.format_target, &self.logger)?;
            Ok(())
        })?;
        reporter.complete_step(None);

        reporter.finish(&format!(
            "Generated Obj-C types and {} clients from {} spec file(s)",
            requests.len(),
            paths.spec_paths.len()
        ));
        self.report_output(&paths, &requests);

        Ok(())
    }

    fn resolve(&self) -> Result<ResolvedPaths, Error> {
        let paths = match &self.base_dir {
            Some(base_dir) => self.config.resolve_in(base_dir)?,
            None => self.config.resolve()?,
        };
        Ok(paths)
    }

    fn compiler(&self, paths: &ResolvedPaths) -> StoneCompiler {
        let compiler = StoneCompiler::new(
            paths.stone_path.clone(),
            self.config.route_whitelist.clone(),
            self.logger.clone(),
        );
        match &self.python {
            Some(python) => compiler.with_python(python.clone()),
            None => compiler,
        }
    }

    fn report_output(&self, paths: &ResolvedPaths, requests: &[GenerationRequest]) {
        match OutputStager::new(&paths.output_path).summarize() {
            Ok(summary) => print_generation_summary(
                &summary.output_directory,
                summary.file_count,
                summary.total_bytes,
                requests.len(),
            ),
            Err(e) => self
                .logger
                .warning(&format!("Could not summarize generated output: {}", e)),
        }
    }

    /// Run one stage, converting its failure into a stage-tagged error and
    /// closing out the progress display on the way.
    fn step<T>(
        &self,
        reporter: &mut ProgressReporter,
        stage: Stage,
        run: impl FnOnce() -> Result<T, Error>,
    ) -> Result<T, GenerationError> {
        match run() {
            Ok(value) => Ok(value),
            Err(source) => {
                reporter.fail_step(&source.to_string());
                Err(GenerationError { stage, source })
            }
        }
    }
}
