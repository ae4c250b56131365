//! Style→task-type bindings.
//!
//! Each transfer style pairs with exactly one task type representing the
//! in-flight operation at the call site. The names are a pure contract
//! consumed by the client emitter; nothing here is ever executed.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::CatalogError;
use crate::models::TransferStyle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBindingTable {
    bindings: BTreeMap<TransferStyle, String>,
}

impl TaskBindingTable {
    /// The fixed table: a plain-response task for rpc, a progress-reporting
    /// task for uploads, and one result task per download flavor.
    pub fn standard() -> Self {
        Self::from_bindings([
            (TransferStyle::Rpc, "DBRpcTask"),
            (TransferStyle::Upload, "DBUploadTask"),
            (TransferStyle::DownloadUrl, "DBDownloadUrlTask"),
            (TransferStyle::DownloadData, "DBDownloadDataTask"),
        ])
    }

    pub fn from_bindings<I, S>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (TransferStyle, S)>,
        S: Into<String>,
    {
        Self {
            bindings: bindings
                .into_iter()
                .map(|(style, task)| (style, task.into()))
                .collect(),
        }
    }

    /// The task type bound to a style.
    pub fn task_for(&self, style: TransferStyle) -> Result<&str, CatalogError> {
        self.bindings
            .get(&style)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::UnknownStyle(style.wire_name().to_string()))
    }

    /// Serialize for the client emitter: style wire name → task type name.
    /// Key order is stable across runs.
    pub fn style_to_request_json(&self) -> String {
        let table: serde_json::Map<String, Value> = self
            .bindings
            .iter()
            .map(|(style, task)| (style.wire_name().to_string(), Value::from(task.as_str())))
            .collect();
        Value::Object(table).to_string()
    }
}
