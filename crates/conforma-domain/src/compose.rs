//! Compose the Conforma policy spec for a rule catalog.

use conforma_types::{PolicySource, PolicySpec, RuleSet, SourceConfig, ids};
use serde_json::{Map, Value as JsonValue};

/// One policy source per rule, pointing at `bundle_location` and including the rule's checks.
///
/// Rule parameters become the source's rule data, keyed by parameter id.
pub fn compose_policy(catalog: &[RuleSet], bundle_location: &str) -> PolicySpec {
    let sources = catalog
        .iter()
        .map(|rule_set| PolicySource {
            name: rule_set.rule.id.clone(),
            policy: vec![bundle_location.to_string()],
            rule_data: rule_data(rule_set),
            config: Some(SourceConfig {
                include: rule_set.checks.iter().map(|c| c.id.clone()).collect(),
                exclude: Vec::new(),
            }),
            ..PolicySource::default()
        })
        .collect();

    PolicySpec {
        name: ids::GENERATED_POLICY_NAME.to_string(),
        description: ids::GENERATED_POLICY_DESCRIPTION.to_string(),
        sources,
        ..PolicySpec::default()
    }
}

fn rule_data(rule_set: &RuleSet) -> Option<JsonValue> {
    if rule_set.rule.parameters.is_empty() {
        return None;
    }
    let params: Map<String, JsonValue> = rule_set
        .rule
        .parameters
        .iter()
        .map(|p| (p.id.clone(), JsonValue::String(p.value.clone())))
        .collect();
    Some(JsonValue::Object(params))
}

/// Check ids in catalog order, as used for template copying.
pub fn check_ids(catalog: &[RuleSet]) -> Vec<&str> {
    catalog
        .iter()
        .flat_map(|r| r.checks.iter().map(|c| c.id.as_str()))
        .collect()
}
