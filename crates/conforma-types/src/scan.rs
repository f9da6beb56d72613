use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// One Conforma run against one check, as written by `ec validate input --output json`.
///
/// Every field the engine may leave out defaults to its zero value. A missing
/// `effective-time` reads as the Unix epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    #[serde(default)]
    pub success: bool,

    #[serde(default, rename = "filepaths", deserialize_with = "null_as_default")]
    pub file_paths: Vec<FileResult>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub policy: PolicySpec,

    #[serde(default, rename = "ec-version")]
    pub ec_version: String,

    #[schemars(with = "String")]
    #[serde(
        default = "unix_epoch",
        rename = "effective-time",
        with = "time::serde::rfc3339"
    )]
    pub effective_time: OffsetDateTime,
}

/// Outcome for a single scanned file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileResult {
    #[serde(default, rename = "filepath")]
    pub file_path: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub violations: Vec<Message>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<Message>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub successes: Vec<Message>,

    #[serde(default)]
    pub success: bool,
    /// Signed, as the engine emits it.
    #[serde(default, rename = "success-count")]
    pub success_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    #[serde(default, rename = "msg")]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, JsonValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            metadata: None,
            outputs: None,
        }
    }
}

/// Enterprise Contract policy spec.
///
/// Only the fields this workspace reads or writes are typed. Everything else
/// (`publicKey`, `identity`, `configuration`, ...) is carried through `extra`
/// so that re-serializing a parsed spec keeps the original payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicySpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<PolicySource>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicySource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,

    /// Arbitrary rule data handed to the policy rules.
    #[serde(default, rename = "ruleData", skip_serializing_if = "Option::is_none")]
    pub rule_data: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SourceConfig>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

/// The engine writes `null` for empty lists; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
