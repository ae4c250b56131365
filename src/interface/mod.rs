pub mod cli;
pub mod config;
pub mod output;

use crate::driver::{GenerationDriver, GenerationError};

pub use cli::*;
pub use config::*;
pub use output::*;

/// Run the whole generation pipeline from a configuration value.
///
/// Convenience wrapper around [`GenerationDriver`] for callers that do not
/// need test seams such as a pinned base directory or interpreter.
pub fn generate_from_config(config: &config::GenerateConfig) -> Result<(), GenerationError> {
    GenerationDriver::new(config.clone()).run()
}
