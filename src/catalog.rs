//! The fixed style→overload-variant registry.
//!
//! Every transfer style expands to a known set of method overloads at the
//! call site: an upload route surfaces once per input representation, a
//! download route once plain and once with a byte range. The catalog owns
//! that expansion table. It is built once per run, validated while it is
//! built, and read-only afterwards.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{ParamKind, ParamSpec, TransferStyle};

const UPLOAD_INPUT_DOC: &str = "The file to upload, as an {} object.";

const DESTINATION_DOC: &str = "The file url of the desired download output location.";

const OVERWRITE_DOC: &str = "A boolean to set behavior in the event of a naming conflict. `YES` will \
     overwrite conflicting file at destination. `NO` will take no action, resulting in an `NSError` \
     returned to the response handler in the event of a file conflict.";

const RANGE_START_DOC: &str = "For partial file download. Download file beginning from this starting byte \
     position. Must include valid end range value.";

const RANGE_END_DOC: &str = "For partial file download. Download file up until this ending byte position. \
     Must include valid start range value.";

/// Defects in the variant or task tables.
///
/// All of these are programmer errors in table construction or lookup, so
/// they surface before any external tool is ever invoked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown transfer style '{0}'")]
    UnknownStyle(String),

    #[error(
        "variant '{style}/{tag}' declares {count} byte-offset parameter(s); \
         byte ranges require a start/end pair or nothing"
    )]
    UnpairedByteRange {
        style: TransferStyle,
        tag: String,
        count: usize,
    },

    #[error("variant tag '{tag}' appears more than once for style '{style}'")]
    DuplicateTag { style: TransferStyle, tag: String },

    #[error("variant '{style}/{tag}' has a parameter with an empty name")]
    EmptyParameterName { style: TransferStyle, tag: String },
}

impl FromStr for TransferStyle {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransferStyle::from_wire(s).ok_or_else(|| CatalogError::UnknownStyle(s.to_string()))
    }
}

/// One concrete method shape a style produces.
///
/// The tag becomes the method-name suffix in generated code; an empty tag
/// marks the style's single implicit shape with no added parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverloadVariant {
    pub style: TransferStyle,
    pub tag: String,
    pub params: Vec<ParamSpec>,
}

impl OverloadVariant {
    /// Build a variant, rejecting shapes the emitter could never satisfy:
    /// byte offsets must come as a start/end pair or not at all, and every
    /// parameter needs both of its names.
    pub fn new(
        style: TransferStyle,
        tag: impl Into<String>,
        params: Vec<ParamSpec>,
    ) -> Result<Self, CatalogError> {
        let tag = tag.into();

        let offsets = params.iter().filter(|p| p.is_byte_offset()).count();
        if offsets != 0 && offsets != 2 {
            return Err(CatalogError::UnpairedByteRange {
                style,
                tag,
                count: offsets,
            });
        }

        if params.iter().any(|p| p.name.is_empty() || p.binding.is_empty()) {
            return Err(CatalogError::EmptyParameterName { style, tag });
        }

        Ok(Self { style, tag, params })
    }

    /// The style's bare shape: no tag suffix, no added parameters.
    pub fn implicit(style: TransferStyle) -> Self {
        Self {
            style,
            tag: String::new(),
            params: Vec::new(),
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.tag.is_empty() && self.params.is_empty()
    }
}

/// Registry of overload variants, keyed by transfer style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantCatalog {
    variants: BTreeMap<TransferStyle, Vec<OverloadVariant>>,
}

impl VariantCatalog {
    /// Assemble a catalog from individual variants, preserving per-style
    /// declaration order and rejecting duplicate tags within a style.
    pub fn from_variants(variants: Vec<OverloadVariant>) -> Result<Self, CatalogError> {
        let mut by_style: BTreeMap<TransferStyle, Vec<OverloadVariant>> = BTreeMap::new();

        for variant in variants {
            let entries = by_style.entry(variant.style).or_default();
            if entries.iter().any(|v| v.tag == variant.tag) {
                return Err(CatalogError::DuplicateTag {
                    style: variant.style,
                    tag: variant.tag,
                });
            }
            entries.push(variant);
        }

        Ok(Self { variants: by_style })
    }

    /// The fixed table every generation run uses.
    ///
    /// Upload surfaces an overload per input representation, in emission
    /// order Url, Data, Stream. Each download style surfaces a plain shape
    /// and a ranged one. Rpc keeps only its implicit shape.
    pub fn standard() -> Result<Self, CatalogError> {
        let upload_param = |name: &str, kind: ParamKind| {
            ParamSpec::same_name(name, kind, UPLOAD_INPUT_DOC.replace("{}", kind.objc_type()))
        };
        let overwrite = || ParamSpec::same_name("overwrite", ParamKind::Flag, OVERWRITE_DOC);
        let destination = || ParamSpec::same_name("destination", ParamKind::FileUrl, DESTINATION_DOC);
        let range = || {
            [
                ParamSpec::same_name("byteOffsetStart", ParamKind::ByteOffset, RANGE_START_DOC),
                ParamSpec::same_name("byteOffsetEnd", ParamKind::ByteOffset, RANGE_END_DOC),
            ]
        };

        let mut ranged_url = vec![overwrite(), destination()];
        ranged_url.extend(range());

        Self::from_variants(vec![
            OverloadVariant::implicit(TransferStyle::Rpc),
            OverloadVariant::new(
                TransferStyle::Upload,
                "Url",
                vec![upload_param("inputUrl", ParamKind::UrlString)],
            )?,
            OverloadVariant::new(
                TransferStyle::Upload,
                "Data",
                vec![upload_param("inputData", ParamKind::Buffer)],
            )?,
            OverloadVariant::new(
                TransferStyle::Upload,
                "Stream",
                vec![upload_param("inputStream", ParamKind::Stream)],
            )?,
            OverloadVariant::new(
                TransferStyle::DownloadUrl,
                "Url",
                vec![overwrite(), destination()],
            )?,
            OverloadVariant::new(TransferStyle::DownloadUrl, "UrlRange", ranged_url)?,
            OverloadVariant::new(TransferStyle::DownloadData, "Data", Vec::new())?,
            OverloadVariant::new(TransferStyle::DownloadData, "DataRange", range().to_vec())?,
        ])
    }

    /// The overloads a style expands to, in emission order.
    pub fn variants_for(&self, style: TransferStyle) -> Result<&[OverloadVariant], CatalogError> {
        self.variants
            .get(&style)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownStyle(style.wire_name().to_string()))
    }

    /// Styles present in the catalog, in table order.
    pub fn styles(&self) -> impl Iterator<Item = TransferStyle> + '_ {
        self.variants.keys().copied()
    }

    /// Serialize the catalog for the client emitter: style wire name →
    /// list of `[tag, [[name, binding, type, doc], …]]` entries. Implicit
    /// variants add nothing to a signature and are left out, so a style
    /// with only its implicit shape has no entry at all. Output is stable
    /// across runs: map keys sort, variant order is declaration order.
    pub fn client_args_json(&self) -> String {
        let mut table = serde_json::Map::new();

        for (style, variants) in &self.variants {
            let entries: Vec<Value> = variants
                .iter()
                .filter(|v| !v.is_implicit())
                .map(|v| {
                    let params: Vec<Value> = v
                        .params
                        .iter()
                        .map(|p| json!([p.name, p.binding, p.kind.objc_type(), p.doc]))
                        .collect();
                    json!([v.tag, params])
                })
                .collect();

            if !entries.is_empty() {
                table.insert(style.wire_name().to_string(), Value::Array(entries));
            }
        }

        Value::Object(table).to_string()
    }
}
