use serde::{Deserialize, Serialize};

/// How a route physically moves its payload.
///
/// Every route carries exactly one style, assigned by the `style` route
/// attribute in its Stone spec and immutable for the route's lifetime. The
/// wire names are the attribute values the Stone compiler emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStyle {
    /// Plain request/response with no payload channel.
    Rpc,
    /// Request carries a file payload upstream.
    Upload,
    /// Response payload is written to a caller-chosen location on disk.
    DownloadUrl,
    /// Response payload is returned as an in-memory buffer.
    DownloadData,
}

impl TransferStyle {
    /// All styles, in table order.
    pub const ALL: [TransferStyle; 4] = [
        TransferStyle::Rpc,
        TransferStyle::Upload,
        TransferStyle::DownloadUrl,
        TransferStyle::DownloadData,
    ];

    /// The `style` attribute value as it appears in route specs.
    pub fn wire_name(&self) -> &'static str {
        match self {
            TransferStyle::Rpc => "rpc",
            TransferStyle::Upload => "upload",
            TransferStyle::DownloadUrl => "download_url",
            TransferStyle::DownloadData => "download_data",
        }
    }

    /// Parse a wire name back into a style.
    pub fn from_wire(name: &str) -> Option<Self> {
        TransferStyle::ALL.into_iter().find(|s| s.wire_name() == name)
    }
}

impl std::fmt::Display for TransferStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Semantic kind of a generated-method parameter.
///
/// Kinds are what the variant tables reason about; the concrete Obj-C
/// spelling is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    /// A file location given as a string path or url.
    UrlString,
    /// An in-memory byte buffer.
    Buffer,
    /// A readable byte stream.
    Stream,
    /// A yes/no toggle.
    Flag,
    /// A file url naming a destination on disk.
    FileUrl,
    /// A numeric byte position inside a payload.
    ByteOffset,
}

impl ParamKind {
    /// The Obj-C type handed to the emitter for this kind.
    pub fn objc_type(&self) -> &'static str {
        match self {
            ParamKind::UrlString => "NSString *",
            ParamKind::Buffer => "NSData *",
            ParamKind::Stream => "NSInputStream *",
            ParamKind::Flag => "BOOL",
            ParamKind::FileUrl => "NSURL *",
            ParamKind::ByteOffset => "NSNumber *",
        }
    }
}

/// One parameter of a generated method overload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    /// Name shown in the generated method signature.
    pub name: String,
    /// Name the emitter binds the value to internally. Usually equal to
    /// `name`; kept separate so a rename never changes behavior.
    pub binding: String,
    pub kind: ParamKind,
    /// Documentation attached to the generated parameter.
    pub doc: String,
}

impl ParamSpec {
    pub fn new(
        name: impl Into<String>,
        binding: impl Into<String>,
        kind: ParamKind,
        doc: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            binding: binding.into(),
            kind,
            doc: doc.into(),
        }
    }

    /// Parameter whose signature name and binding name coincide, the common
    /// case throughout the fixed tables.
    pub fn same_name(name: &str, kind: ParamKind, doc: impl Into<String>) -> Self {
        Self::new(name, name, kind, doc)
    }

    pub fn is_byte_offset(&self) -> bool {
        self.kind == ParamKind::ByteOffset
    }
}
