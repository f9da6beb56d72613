//! The provider contract the host drives, and its Conforma implementation.

use anyhow::Context;
use conforma_repo::ResultLoader;
use conforma_settings::{ConformaConfig, resolve_config};
use conforma_types::{PvpResult, RuleSet};
use std::collections::BTreeMap;
use tracing::{Span, debug};

use crate::{Aggregator, run_generate};

/// A policy validation point as seen by the compliance host.
///
/// The host configures the provider once, then asks it to generate policy for a catalog or to
/// report results for one.
pub trait PolicyProvider {
    fn configure(&mut self, options: &BTreeMap<String, String>) -> anyhow::Result<()>;

    fn generate(&self, catalog: &[RuleSet]) -> anyhow::Result<()>;

    fn get_results(&self, catalog: &[RuleSet]) -> anyhow::Result<PvpResult>;
}

#[derive(Clone, Debug)]
pub struct ConformaProvider {
    config: ConformaConfig,
    span: Span,
}

impl ConformaProvider {
    pub fn new(span: Span) -> Self {
        Self {
            config: ConformaConfig::default(),
            span,
        }
    }

    /// Complete and validate `config`, then adopt it.
    pub fn apply_config(&mut self, config: ConformaConfig) -> anyhow::Result<()> {
        self.config = resolve_config(config).context("invalid provider configuration")?;
        Ok(())
    }

    pub fn config(&self) -> &ConformaConfig {
        &self.config
    }
}

impl PolicyProvider for ConformaProvider {
    fn configure(&mut self, options: &BTreeMap<String, String>) -> anyhow::Result<()> {
        for key in ConformaConfig::ignored_options(options) {
            debug!(parent: &self.span, key, "ignoring option not read by this provider");
        }
        let config = ConformaConfig::from_options(options)
            .context("error decoding configuration")?;
        self.apply_config(config)
    }

    fn generate(&self, catalog: &[RuleSet]) -> anyhow::Result<()> {
        run_generate(&self.config, catalog, &self.span)?;
        Ok(())
    }

    /// Load results from `policy-results` and aggregate them, writing evidence next to them.
    fn get_results(&self, catalog: &[RuleSet]) -> anyhow::Result<PvpResult> {
        let dir = self.config.require_policy_results()?;
        let index = ResultLoader::new(self.span.clone())
            .load(dir)
            .context("failed to load policy results")?;
        let observations = Aggregator::new(self.span.clone())
            .aggregate(catalog, &index, dir)
            .context("failed to aggregate policy results")?;

        Ok(PvpResult {
            observations_by_check: observations,
            links: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::{Utf8Path, Utf8PathBuf};
    use conforma_types::SubjectResult;
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

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn provider() -> ConformaProvider {
        ConformaProvider::new(Span::none())
    }

    const FAILING_RESULT: &str = r#"{
        "success": false,
        "filepaths": [
            {"filepath": "a.rego", "violations": [{"msg": "bad"}], "success": false}
        ],
        "policy": {"name": "Example"},
        "ec-version": "v0.6.0",
        "effective-time": "2025-01-02T03:04:05Z"
    }"#;

    #[test]
    fn configure_completes_bundle_location() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let mut p = provider();
        p.configure(&options(&[
            ("policy-results", root.as_str()),
            ("policy-output", "/policy"),
        ]))
        .expect("configure");
        assert_eq!(p.config().bundle_location(), Some("/policy"));
    }

    #[test]
    fn configure_reports_every_problem() {
        let mut p = provider();
        let err = p
            .configure(&options(&[("policy-results", "/does/not/exist")]))
            .unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("/does/not/exist"), "{text}");
        assert!(text.contains("bundle-location cannot be empty"), "{text}");
    }

    #[test]
    fn configure_ignores_host_options() {
        let mut p = provider();
        p.configure(&options(&[
            ("bundle-location", "oci://example/policy"),
            ("results", "/tmp"),
        ]))
        .expect("configure");
        assert_eq!(p.config().bundle_location(), Some("oci://example/policy"));
        assert!(p.config().policy_results().is_none());
    }

    #[test]
    fn get_results_end_to_end() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("check-1.json"), FAILING_RESULT);

        let mut p = provider();
        p.configure(&options(&[
            ("policy-results", root.as_str()),
            ("bundle-location", "oci://example/policy"),
        ]))
        .expect("configure");

        let catalog = vec![RuleSet::new("rule-1", &["check-1", "check-2"])];
        let result = p.get_results(&catalog).expect("results");

        assert!(result.links.is_empty());
        assert_eq!(result.observations_by_check.len(), 1);
        let obs = &result.observations_by_check[0];
        assert_eq!(obs.check_id, "check-1");
        assert_eq!(
            obs.relevant_evidences[0].href,
            format!("file://{}", root.join("check-1.ocsf"))
        );
        assert_eq!(obs.subjects[0].result, SubjectResult::Fail);
        assert_eq!(obs.subjects[0].reason, "bad");
        assert!(root.join("check-1.ocsf").is_file());
    }

    #[test]
    fn get_results_requires_results_directory() {
        let p = provider();
        let err = p.get_results(&[]).unwrap_err();
        assert!(err.to_string().contains("policy-results"), "{err}");
    }

    #[test]
    fn malformed_result_fails_without_observations() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("check-1.json"), "{");

        let mut p = provider();
        p.apply_config(ConformaConfig {
            policy_results: Some(root.to_string()),
            bundle_location: Some("oci://example/policy".to_string()),
            ..ConformaConfig::default()
        })
        .expect("apply");

        let err = p
            .get_results(&[RuleSet::new("rule-1", &["check-1"])])
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to load policy results");
        assert!(format!("{err:#}").contains("check-1.json"));
    }

    #[test]
    fn generate_writes_policy_file() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let mut p = provider();
        p.configure(&options(&[
            ("conforma-policy-path", root.as_str()),
            ("bundle-location", "oci://example/policy"),
        ]))
        .expect("configure");

        p.generate(&[RuleSet::new("rule-1", &["check-1"])])
            .expect("generate");
        assert!(root.join("policy.yaml").is_file());
    }
}
