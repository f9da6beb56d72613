//! OCSF 1.5.0 Scan Activity evidence record.
//!
//! Every `Option` field is omitted when `None` and emitted when `Some`, even if the
//! contained value is empty or zero. Consumers key on presence, so do not collapse
//! these into plain values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub product: Product,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_provider: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Observable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub type_id: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Policy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Canonical JSON of the evaluated policy spec, embedded as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanActivity {
    pub activity_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub category_uid: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub class_uid: i32,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_files: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observables: Vec<Observable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub severity_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i32>,
    /// Event time in milliseconds since the Unix epoch.
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub type_uid: i64,
}

/// Scan activity plus the policy it evaluated and the action taken.
///
/// The activity fields sit at the top level of the serialized record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Evidence {
    #[serde(flatten)]
    pub scan_activity: ScanActivity,
    pub policy: Policy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<i32>,
}
