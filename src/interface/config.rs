use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional spec directory, searched when no specs are listed.
pub const SPEC_DIR: &str = "spec";
/// File extension of route spec files.
pub const SPEC_EXTENSION: &str = "stone";
/// Default location of the stone compiler clone.
pub const STONE_DIR: &str = "stone";
/// Root of the SDK sources, the default formatting target.
pub const SOURCE_DIR: &str = "Source";
/// The managed output directory. Only this path is ever cleared.
pub const CANONICAL_OUTPUT_DIR: &str = "Source/ObjectiveDropboxOfficial/Shared/Generated";
/// Directory holding the formatter script.
pub const FORMAT_DIR: &str = "Format";
/// The formatter script, run from inside `FORMAT_DIR`.
pub const FORMAT_SCRIPT: &str = "format_files.sh";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no route specs given and no .{} files found under {}", SPEC_EXTENSION, .0.display())]
    NoSpecsFound(PathBuf),
    #[error("route spec does not exist: {}", .0.display())]
    SpecNotFound(PathBuf),
    #[error("stone clone not found at {}", .0.display())]
    CompilerNotFound(PathBuf),
    #[error("formatter script not found at {}", .0.display())]
    FormatterNotFound(PathBuf),
}

/// Everything a generation run can be told from the outside.
///
/// Relative paths are resolved against the invocation directory, the way
/// the tool is run from an SDK checkout; `resolve_in` pins the anchor for
/// callers that need a different one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerateConfig {
    /// Print progress detail while generating
    #[serde(default)]
    pub verbose: bool,

    /// Route spec files to generate from. Empty means: every spec file
    /// under the conventional spec directory, sorted.
    #[serde(default)]
    pub specs: Vec<PathBuf>,

    /// Path to the stone compiler clone
    #[serde(default)]
    pub stone_path: Option<PathBuf>,

    /// Generate the documentation config file
    #[serde(default = "default_documentation")]
    pub documentation: bool,

    /// Mark generated sources for exclusion from static analysis
    #[serde(default)]
    pub exclude_from_analysis: bool,

    /// Output path override. Overridden outputs are never cleared.
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Formatting target override
    #[serde(default)]
    pub format_output_path: Option<PathBuf>,

    /// Route allow-list filter, handed to the compiler untouched
    #[serde(default)]
    pub route_whitelist: Option<PathBuf>,
}

fn default_documentation() -> bool {
    true
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            specs: Vec::new(),
            stone_path: None,
            documentation: default_documentation(),
            exclude_from_analysis: false,
            output_path: None,
            format_output_path: None,
            route_whitelist: None,
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve against the current working directory.
    pub fn resolve(&self) -> Result<ResolvedPaths, ConfigError> {
        let base = std::env::current_dir()?;
        self.resolve_in(&base)
    }

    /// Resolve every path this run will touch, anchored at `base`.
    ///
    /// Fails fast on anything a doomed run would otherwise discover only
    /// after clearing the output tree: missing spec files, a missing
    /// compiler clone, a missing formatter script, or no specs at all.
    pub fn resolve_in(&self, base: &Path) -> Result<ResolvedPaths, ConfigError> {
        let spec_paths = if self.specs.is_empty() {
            let discovered = discover_specs(base)?;
            if discovered.is_empty() {
                return Err(ConfigError::NoSpecsFound(base.join(SPEC_DIR)));
            }
            discovered
        } else {
            let mut resolved = Vec::with_capacity(self.specs.len());
            for spec in &self.specs {
                let path = base.join(spec);
                if !path.is_file() {
                    return Err(ConfigError::SpecNotFound(path));
                }
                resolved.push(path);
            }
            resolved
        };

        let stone_path = match &self.stone_path {
            Some(path) => base.join(path),
            None => base.join(STONE_DIR),
        };
        if !stone_path.is_dir() {
            return Err(ConfigError::CompilerNotFound(stone_path));
        }

        let canonical_output = base.join(CANONICAL_OUTPUT_DIR);
        let output_path = match &self.output_path {
            Some(path) => base.join(path),
            None => canonical_output.clone(),
        };
        let is_canonical_output = output_path == canonical_output;

        let format_script_dir = base.join(FORMAT_DIR);
        let format_script = format_script_dir.join(FORMAT_SCRIPT);
        if !format_script.is_file() {
            return Err(ConfigError::FormatterNotFound(format_script));
        }

        let format_target = match &self.format_output_path {
            Some(path) => base.join(path),
            None => base.join(SOURCE_DIR),
        };

        Ok(ResolvedPaths {
            spec_paths,
            stone_path,
            output_path,
            is_canonical_output,
            format_script_dir,
            format_target,
        })
    }
}

/// Absolute paths for one run, anchored and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub spec_paths: Vec<PathBuf>,
    pub stone_path: PathBuf,
    pub output_path: PathBuf,
    /// Whether `output_path` is the managed directory. The destructive
    /// clear before generation runs only when this holds.
    pub is_canonical_output: bool,
    pub format_script_dir: PathBuf,
    pub format_target: PathBuf,
}

/// Collect every spec file under `base`'s conventional spec directory,
/// sorted for deterministic compiler argument order. A missing directory
/// yields an empty list, not an error.
pub fn discover_specs(base: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let spec_dir = base.join(SPEC_DIR);
    if !spec_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut specs = Vec::new();
    for entry in fs::read_dir(&spec_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SPEC_EXTENSION) {
            specs.push(path);
        }
    }
    specs.sort();
    Ok(specs)
}
