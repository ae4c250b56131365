//! Output staging: the managed generated-sources directory and the
//! formatting pass that closes every run.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::compiler::captured;
use crate::interface::config::FORMAT_SCRIPT;
use crate::interface::output::Logger;

#[derive(Error, Debug)]
pub enum StagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to launch formatter {}: {source}", .script.display())]
    FormatterLaunch {
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("formatter failed with {status}{}", captured(.stdout, .stderr))]
    FormattingFailed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

/// Handle on the directory generated sources land in.
pub struct OutputStager {
    output_dir: PathBuf,
}

impl OutputStager {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Wipe the directory and recreate it empty. Only ever called on the
    /// canonical managed path; a directory that is already gone is fine,
    /// recreation happens regardless.
    pub fn clear_and_recreate(&self) -> Result<(), StagingError> {
        match fs::remove_dir_all(&self.output_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Non-destructive counterpart for overridden output paths: make sure
    /// the directory exists, touch nothing inside it.
    pub fn ensure_exists(&self) -> Result<(), StagingError> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Walk the generated tree and tally what a run produced.
    pub fn summarize(&self) -> Result<TreeSummary, StagingError> {
        let mut file_count = 0;
        let mut total_bytes = 0;

        if self.output_dir.is_dir() {
            for entry in WalkDir::new(&self.output_dir) {
                let entry = entry.map_err(std::io::Error::from)?;
                if entry.file_type().is_file() {
                    file_count += 1;
                    total_bytes += entry.metadata().map_err(std::io::Error::from)?.len();
                }
            }
        }

        Ok(TreeSummary {
            output_directory: self.output_dir.clone(),
            generated_at: chrono::Utc::now(),
            file_count,
            total_bytes,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub output_directory: PathBuf,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub file_count: usize,
    pub total_bytes: u64,
}

/// Run the formatter script over `target`, from inside the script's own
/// directory. Non-zero exit surfaces with everything the script printed;
/// stdout on success is informational.
pub fn run_formatter(script_dir: &Path, target: &Path, logger: &Logger) -> Result<(), StagingError> {
    let script = script_dir.join(FORMAT_SCRIPT);
    logger.verbose(&format!(
        "Running: {} {}",
        script.display(),
        target.display()
    ));

    let output = Command::new(&script)
        .arg(target)
        .current_dir(script_dir)
        .output()
        .map_err(|source| StagingError::FormatterLaunch {
            script: script.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(StagingError::FormattingFailed {
            status: output.status,
            stdout,
            stderr,
        });
    }

    if !stdout.trim().is_empty() {
        logger.info(&format!("Output: {}", stdout.trim_end()));
    }
    Ok(())
}
