//! The three client surfaces and the per-audience generation requests.
//!
//! Every run emits the same route set three times: once for end users, once
//! for team administration, once for app-scoped callers. The surfaces share
//! routes, variant catalog, and task table; only the naming differs, and
//! the transport binding is the same for all of them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::VariantCatalog;
use crate::interface::config::{ConfigError, SPEC_DIR};
use crate::tasks::TaskBindingTable;

/// Transport-binding type shared by every audience.
pub const TRANSPORT_CLIENT: &str = "DBTransportClient";

/// One of the generated client surfaces. The set is closed; requests are
/// issued in declaration order so logs stay reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    User,
    Team,
    App,
}

impl Audience {
    pub const ALL: [Audience; 3] = [Audience::User, Audience::Team, Audience::App];

    /// The `-w` value handed to the client emitter.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Audience::User => "user",
            Audience::Team => "team",
            Audience::App => "app",
        }
    }

    /// The concrete client type emitted for this audience.
    pub fn client_type(&self) -> &'static str {
        match self {
            Audience::User => "DBUserBaseClient",
            Audience::Team => "DBTeamBaseClient",
            Audience::App => "DBAppBaseClient",
        }
    }

    pub fn scope(&self) -> AudienceScope {
        AudienceScope {
            audience: *self,
            method_family: self.client_type(),
            client_type: self.client_type(),
            transport_type: TRANSPORT_CLIENT,
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Naming bundle for one audience's emission. Built once per run and
/// dropped when the corresponding compiler invocation returns.
///
/// The method family and client type currently coincide, but the emitter
/// accepts them independently, so they stay separate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudienceScope {
    pub audience: Audience,
    pub method_family: &'static str,
    pub client_type: &'static str,
    pub transport_type: &'static str,
}

/// Emitter toggles that ride along with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitFlags {
    /// Generate the documentation config file. On unless switched off.
    pub documentation: bool,
    /// Mark generated sources for exclusion from static analysis.
    pub exclude_from_analysis: bool,
}

impl Default for EmitFlags {
    fn default() -> Self {
        Self {
            documentation: true,
            exclude_from_analysis: false,
        }
    }
}

/// Everything one client-emission invocation needs. Built fresh per
/// audience, owned by that invocation, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub scope: AudienceScope,
    pub spec_paths: Vec<PathBuf>,
    pub output_path: PathBuf,
    /// Serialized variant catalog, as the `-y` payload.
    pub client_args: String,
    /// Serialized task bindings, as the `-z` payload.
    pub style_to_request: String,
    pub flags: EmitFlags,
}

/// Expand one route set into the three per-audience requests, in fixed
/// order. The catalog and task table are serialized once and shared by
/// value across the requests.
///
/// An empty spec list is refused outright: a run with zero inputs would
/// replace all previously generated output with nothing.
pub fn build_requests(
    spec_paths: &[PathBuf],
    output_path: &Path,
    catalog: &VariantCatalog,
    tasks: &TaskBindingTable,
    flags: EmitFlags,
) -> Result<Vec<GenerationRequest>, ConfigError> {
    if spec_paths.is_empty() {
        return Err(ConfigError::NoSpecsFound(PathBuf::from(SPEC_DIR)));
    }

    let client_args = catalog.client_args_json();
    let style_to_request = tasks.style_to_request_json();

    Ok(Audience::ALL
        .iter()
        .map(|audience| GenerationRequest {
            scope: audience.scope(),
            spec_paths: spec_paths.to_vec(),
            output_path: output_path.to_path_buf(),
            client_args: client_args.clone(),
            style_to_request: style_to_request.clone(),
            flags,
        })
        .collect())
}
