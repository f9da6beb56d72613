use crate::ConfigError;
use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Provider configuration, keyed the way the host passes it (`policy-results`, ...).
///
/// Every field is optional at parse time. Empty strings count as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConformaConfig {
    /// Directory holding `<checkId>.json` scan results. Evidence is written here too.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_results: Option<String>,

    /// Directory receiving the generated `policy.yaml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conforma_policy_path: Option<String>,

    /// Policy source referenced from every generated policy source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_location: Option<String>,

    /// OCI reference for a locally built bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_revision: Option<String>,

    /// Directory with one policy template directory per check id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_templates: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_output: Option<String>,
}

impl ConformaConfig {
    /// Option keys this provider reads.
    pub const KEYS: [&'static str; 7] = [
        "policy-results",
        "conforma-policy-path",
        "bundle-location",
        "bundle",
        "bundle-revision",
        "policy-templates",
        "policy-output",
    ];

    /// Decode the host's string map.
    ///
    /// Empty values are dropped. Keys outside [`Self::KEYS`] belong to the host and are
    /// skipped; [`Self::ignored_options`] lists them.
    pub fn from_options(options: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let map: Map<String, Value> = options
            .iter()
            .filter(|(k, v)| !v.is_empty() && Self::KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Keys in `options` that [`Self::from_options`] skips.
    pub fn ignored_options(options: &BTreeMap<String, String>) -> impl Iterator<Item = &str> {
        options
            .keys()
            .map(String::as_str)
            .filter(|k| !Self::KEYS.contains(k))
    }

    /// Field-wise overlay: values set in `overrides` win.
    pub fn merge(self, overrides: ConformaConfig) -> ConformaConfig {
        ConformaConfig {
            policy_results: overrides.policy_results.or(self.policy_results),
            conforma_policy_path: overrides.conforma_policy_path.or(self.conforma_policy_path),
            bundle_location: overrides.bundle_location.or(self.bundle_location),
            bundle: overrides.bundle.or(self.bundle),
            bundle_revision: overrides.bundle_revision.or(self.bundle_revision),
            policy_templates: overrides.policy_templates.or(self.policy_templates),
            policy_output: overrides.policy_output.or(self.policy_output),
        }
    }

    pub fn policy_results(&self) -> Option<&Utf8Path> {
        set(&self.policy_results).map(Utf8Path::new)
    }

    pub fn conforma_policy_path(&self) -> Option<&Utf8Path> {
        set(&self.conforma_policy_path).map(Utf8Path::new)
    }

    pub fn policy_templates(&self) -> Option<&Utf8Path> {
        set(&self.policy_templates).map(Utf8Path::new)
    }

    pub fn policy_output(&self) -> Option<&Utf8Path> {
        set(&self.policy_output).map(Utf8Path::new)
    }

    pub fn bundle_location(&self) -> Option<&str> {
        set(&self.bundle_location)
    }

    pub fn bundle(&self) -> Option<&str> {
        set(&self.bundle)
    }

    pub fn bundle_revision(&self) -> Option<&str> {
        set(&self.bundle_revision)
    }

    pub fn require_policy_results(&self) -> Result<&Utf8Path, ConfigError> {
        self.policy_results()
            .ok_or(ConfigError::Missing { key: "policy-results" })
    }

    pub fn require_conforma_policy_path(&self) -> Result<&Utf8Path, ConfigError> {
        self.conforma_policy_path().ok_or(ConfigError::Missing {
            key: "conforma-policy-path",
        })
    }

    pub fn require_bundle_location(&self) -> Result<&str, ConfigError> {
        self.bundle_location().ok_or(ConfigError::BundleLocationEmpty)
    }
}

pub(crate) fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
