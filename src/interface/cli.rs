use crate::interface::config::GenerateConfig;
use clap::Parser;
use std::path::PathBuf;

/// Runs Stone to generate Obj-C types and client for the Dropbox client.
#[derive(Parser, Debug)]
#[command(name = "stone-clientgen")]
pub struct Cli {
    /// Path to API specifications. Each must have a .stone extension.
    #[arg(value_name = "SPEC")]
    pub spec: Vec<PathBuf>,

    /// Print debugging statements.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Path to clone of stone repository.
    #[arg(short = 's', long = "stone")]
    pub stone: Option<PathBuf>,

    /// Sets whether documentation config file should be generated.
    #[arg(short = 'd', long = "documentation", action = clap::ArgAction::SetFalse)]
    pub documentation: bool,

    /// Sets whether generated code should be marked for exclusion from analysis.
    #[arg(short = 'e', long = "exclude-from-analysis", action = clap::ArgAction::SetTrue)]
    pub exclude_from_analysis: bool,

    /// Path to generation output.
    #[arg(short = 'o', long = "output-path")]
    pub output_path: Option<PathBuf>,

    /// Path to format output.
    #[arg(short = 'f', long = "format-output-path")]
    pub format_output_path: Option<PathBuf>,

    /// Path to route whitelist filter used by Stone. See stone -r for
    /// detailed instructions.
    #[arg(short = 'r', long = "route-whitelist-filter")]
    pub route_whitelist_filter: Option<PathBuf>,
}

impl From<&Cli> for GenerateConfig {
    fn from(cli: &Cli) -> Self {
        GenerateConfig {
            verbose: cli.verbose,
            specs: cli.spec.clone(),
            stone_path: cli.stone.clone(),
            documentation: cli.documentation,
            exclude_from_analysis: cli.exclude_from_analysis,
            output_path: cli.output_path.clone(),
            format_output_path: cli.format_output_path.clone(),
            route_whitelist: cli.route_whitelist_filter.clone(),
        }
    }
}
