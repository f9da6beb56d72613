use crate::model::set;
use crate::{ConfigError, ConfigErrors, ConformaConfig};
use camino::Utf8Path;

/// Fill defaults, then validate. Returns the completed config.
pub fn resolve_config(mut cfg: ConformaConfig) -> Result<ConformaConfig, ConfigErrors> {
    cfg.complete();
    cfg.validate()?;
    Ok(cfg)
}

impl ConformaConfig {
    /// Default `bundle-location` to `bundle`, else to `policy-output`.
    pub fn complete(&mut self) {
        if set(&self.bundle_location).is_some() {
            return;
        }
        let fallback = set(&self.bundle).or(set(&self.policy_output));
        if let Some(location) = fallback {
            self.bundle_location = Some(location.to_string());
        }
    }

    /// Check every configured path and the bundle location, collecting all failures.
    ///
    /// Unset paths are not errors here; the operation that needs one reports it.
    pub fn validate(&self) -> Result<(), ConfigErrors> {
        let mut errs = ConfigErrors::default();

        check_path(&mut errs, "policy-results", self.policy_results());
        check_path(&mut errs, "conforma-policy-path", self.conforma_policy_path());

        if self.policy_templates().is_some() {
            check_path(&mut errs, "policy-output", self.policy_output());
            check_path(&mut errs, "policy-templates", self.policy_templates());
        }

        if self.bundle_location().is_none() {
            errs.push(ConfigError::BundleLocationEmpty);
        }

        errs.into_result()
    }
}

fn check_path(errs: &mut ConfigErrors, key: &'static str, path: Option<&Utf8Path>) {
    let Some(path) = path else {
        return;
    };
    if let Err(error) = std::fs::metadata(path) {
        errs.push(ConfigError::Path {
            key,
            path: path.to_path_buf(),
            error,
        });
    }
}
