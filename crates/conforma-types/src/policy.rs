//! Host-facing policy catalog and assessment result types.
//!
//! The host (compliance-to-policy) hands over a catalog of rules with their checks and
//! expects observations back. Only identifiers and parameters are read from the catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Rule {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Check {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A rule together with the checks that implement it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSet {
    pub rule: Rule,
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl RuleSet {
    pub fn new(rule_id: impl Into<String>, check_ids: &[&str]) -> Self {
        Self {
            rule: Rule {
                id: rule_id.into(),
                ..Rule::default()
            },
            checks: check_ids
                .iter()
                .map(|id| Check {
                    id: (*id).to_string(),
                    description: String::new(),
                })
                .collect(),
        }
    }
}

/// Ordered rule catalog.
pub type RuleCatalog = Vec<RuleSet>;

/// Assessment outcome for one subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubjectResult {
    Pass,
    Fail,
}

impl SubjectResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            SubjectResult::Pass => "pass",
            SubjectResult::Fail => "fail",
        }
    }
}

impl fmt::Display for SubjectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    pub href: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Subject {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub resource_id: String,
    pub result: SubjectResult,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub evaluated_on: OffsetDateTime,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ObservationByCheck {
    pub title: String,
    pub description: String,
    pub check_id: String,
    pub methods: Vec<String>,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub collected: OffsetDateTime,
    #[serde(default)]
    pub relevant_evidences: Vec<Link>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// Everything a provider reports back for one assessment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PvpResult {
    #[serde(default)]
    pub observations_by_check: Vec<ObservationByCheck>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}
