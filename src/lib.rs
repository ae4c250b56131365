//! # Stone Clientgen
//!
//! Generation driver for the Objective-C Dropbox SDK.
//!
//! This library locates the SDK's `.stone` route definitions, runs the Stone
//! compiler's `obj_c_types` and `obj_c_client` backends for every client
//! audience, and formats the generated sources in place.
//!
//! ## Features
//!
//! - 🔍 **Spec Discovery**: Finds `.stone` route definitions under the SDK's `spec/` directory
//! - 📝 **Type Generation**: Runs the `obj_c_types` backend over every discovered spec
//! - 🚀 **Client Generation**: Emits `DBUserBaseClient`, `DBTeamBaseClient`, and `DBAppBaseClient` in one pass
//! - 📦 **Route Overloads**: URL, data, and stream upload variants plus ranged download variants
//! - 🎨 **Formatting**: Runs the SDK's format script over the freshly generated files
//!
//! ## Quick Start
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Run from the root of the SDK checkout
//! stone-clientgen
//!
//! # Pin explicit specs and leave route docs out of the output
//! stone-clientgen -d spec/files.stone spec/users.stone
//! ```
//!
//! ### Programmatic Usage
//!
//! ```rust,no_run
//! use stone_clientgen::{generate_from_config, GenerateConfig};
//!
//! let config = GenerateConfig {
//!     verbose: true,
//!     output_path: Some("Source/Generated".into()),
//!     ..Default::default()
//! };
//!
//! generate_from_config(&config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. Resolve the SDK layout and collect the spec files
//! 2. Build the route-overload catalog and task binding table
//! 3. Clear the canonical output directory (overridden outputs are left as-is)
//! 4. Emit types, then the user, team, and app base clients
//! 5. Run the SDK's format script over the result
//!
//! ## Expected Layout
//!
//! The tool anchors every relative path at the current directory, which is
//! expected to be an SDK checkout:
//!
//! ```text
//! <sdk root>/
//! ├── spec/            *.stone route definitions
//! ├── stone/           Stone compiler checkout (run via `python3 -m stone.cli`)
//! ├── Format/          format_files.sh
//! └── Source/ObjectiveDropboxOfficial/Shared/Generated/
//! ```
//!
//! The `-s`, `-o`, and `-f` flags override the stone checkout, output, and
//! format target respectively.

// Core library modules for the CLI tool
pub mod audience;
pub mod catalog;
pub mod compiler;
pub mod driver;
mod error;
pub mod interface;
pub mod models;
pub mod staging;
pub mod tasks;

pub use error::{Error, Result};
pub use models::*;

// Convenience re-exports for common use cases
pub use interface::config::GenerateConfig;
pub use interface::generate_from_config;
pub use interface::output::{Logger, ProgressReporter};

// Generation pipeline entry points
pub use audience::{Audience, AudienceScope, EmitFlags, GenerationRequest};
pub use catalog::VariantCatalog;
pub use driver::{GenerationDriver, GenerationError, Stage};
pub use tasks::TaskBindingTable;
