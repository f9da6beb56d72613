//! The `generate` use case: compose the Conforma policy for a catalog and write it out.

use anyhow::Context;
use camino::Utf8PathBuf;
use conforma_domain::compose::{check_ids, compose_policy};
use conforma_repo::{copy_check_templates, write_policy_file};
use conforma_settings::{ConfigError, ConformaConfig};
use conforma_types::RuleSet;
use tracing::{Span, info, warn};

/// Output from the generate use case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOutput {
    /// The written `policy.yaml`.
    pub policy_path: Utf8PathBuf,
    /// Directory the check templates were copied into, when templates are configured.
    pub template_dir: Option<Utf8PathBuf>,
}

/// Write `<conforma-policy-path>/policy.yaml` for `catalog`, copying check templates first
/// when `policy-templates` is set.
///
/// Bundle compilation is left to external tooling; a configured `bundle` is only reported.
pub fn run_generate(
    cfg: &ConformaConfig,
    catalog: &[RuleSet],
    span: &Span,
) -> anyhow::Result<GenerateOutput> {
    let policy_dir = cfg.require_conforma_policy_path()?;
    let bundle_location = cfg.require_bundle_location()?;

    let template_dir = match cfg.policy_templates() {
        Some(templates) => {
            let output = cfg.policy_output().ok_or(ConfigError::Missing {
                key: "policy-output",
            })?;
            let dest = output.join("policy");
            std::fs::create_dir_all(&dest)
                .with_context(|| format!("failed to create output directory {dest}"))?;
            let checks = check_ids(catalog);
            copy_check_templates(templates, &dest, &checks)?;
            info!(parent: span, templates = checks.len(), dest = %dest, "copied policy templates");
            Some(dest)
        }
        None => None,
    };

    let spec = compose_policy(catalog, bundle_location);
    let policy_path = write_policy_file(policy_dir, &spec).context("error generating policies")?;
    info!(
        parent: span,
        path = %policy_path,
        sources = spec.sources.len(),
        "wrote conforma policy"
    );

    if let Some(bundle) = cfg.bundle() {
        warn!(
            parent: span,
            bundle,
            revision = cfg.bundle_revision().unwrap_or_default(),
            "bundle compilation is not performed; build the bundle from the policy output externally"
        );
    }

    Ok(GenerateOutput {
        policy_path,
        template_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use conforma_types::{Parameter, PolicySpec};
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    fn catalog() -> Vec<RuleSet> {
        let mut rule = RuleSet::new("rule-1", &["check-1", "check-2"]);
        rule.rule.parameters.push(Parameter {
            id: "min_reviewers".to_string(),
            description: String::new(),
            value: "2".to_string(),
        });
        vec![rule]
    }

    #[test]
    fn writes_policy_yaml_for_catalog() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let cfg = ConformaConfig {
            conforma_policy_path: Some(root.to_string()),
            bundle_location: Some("oci://example/policy".to_string()),
            ..ConformaConfig::default()
        };

        let out = run_generate(&cfg, &catalog(), &Span::none()).expect("generate");
        assert_eq!(out.policy_path, root.join("policy.yaml"));
        assert!(out.template_dir.is_none());

        let text = std::fs::read_to_string(&out.policy_path).expect("read policy");
        let spec: PolicySpec = serde_yaml::from_str(&text).expect("parse policy");
        assert_eq!(spec.name, "C2P Policy");
        assert_eq!(spec.description, "Policy Created by C2P");
        assert_eq!(spec.sources.len(), 1);
        assert_eq!(spec.sources[0].policy, vec!["oci://example/policy".to_string()]);
        assert_eq!(
            spec.sources[0].config.as_ref().map(|c| c.include.clone()),
            Some(vec!["check-1".to_string(), "check-2".to_string()])
        );
        assert_eq!(
            spec.sources[0].rule_data,
            Some(serde_json::json!({"min_reviewers": "2"}))
        );
    }

    #[test]
    fn copies_templates_under_policy_output() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("templates/check-1/rule.rego"), "package check_1\n");
        write_file(&root.join("templates/check-2/rule.rego"), "package check_2\n");
        std::fs::create_dir_all(root.join("out")).expect("create out");

        let cfg = ConformaConfig {
            conforma_policy_path: Some(root.to_string()),
            policy_templates: Some(root.join("templates").to_string()),
            policy_output: Some(root.join("out").to_string()),
            bundle_location: Some(root.join("out").to_string()),
            ..ConformaConfig::default()
        };

        let out = run_generate(&cfg, &catalog(), &Span::none()).expect("generate");
        assert_eq!(out.template_dir, Some(root.join("out/policy")));
        assert!(root.join("out/policy/check-1/rule.rego").is_file());
        assert!(root.join("out/policy/check-2/rule.rego").is_file());
    }

    #[test]
    fn missing_template_fails_generation() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("templates/check-1/rule.rego"), "package check_1\n");

        let cfg = ConformaConfig {
            conforma_policy_path: Some(root.to_string()),
            policy_templates: Some(root.join("templates").to_string()),
            policy_output: Some(root.join("out").to_string()),
            bundle_location: Some("oci://example/policy".to_string()),
            ..ConformaConfig::default()
        };

        let err = run_generate(&cfg, &catalog(), &Span::none()).unwrap_err();
        assert!(format!("{err:#}").contains("check-2"), "{err:#}");
        assert!(!root.join("policy.yaml").exists());
    }

    #[test]
    fn policy_path_is_required() {
        let cfg = ConformaConfig {
            bundle_location: Some("oci://example/policy".to_string()),
            ..ConformaConfig::default()
        };
        let err = run_generate(&cfg, &catalog(), &Span::none()).unwrap_err();
        assert!(err.to_string().contains("conforma-policy-path"), "{err}");
    }
}
