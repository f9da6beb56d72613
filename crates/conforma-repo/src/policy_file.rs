use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use conforma_types::{PolicySpec, ids};

use crate::evidence::write_private;

/// Write `spec` as `<dir>/policy.yaml`, the file handed to `ec validate --policy`.
///
/// A newly created file is owner-only on unix, like the evidence files.
pub fn write_policy_file(dir: &Utf8Path, spec: &PolicySpec) -> anyhow::Result<Utf8PathBuf> {
    let path = dir.join(ids::POLICY_FILE_NAME);
    let data = serde_yaml::to_string(spec).context("serialize conforma policy")?;
    write_private(&path, data.as_bytes())
        .with_context(|| format!("write policy config to {path}"))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conforma_types::{PolicySource, SourceConfig};
    use tempfile::TempDir;

    #[test]
    fn written_policy_reads_back() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let spec = PolicySpec {
            name: "C2P Policy".to_string(),
            description: "Policy Created by C2P".to_string(),
            sources: vec![PolicySource {
                name: "rule-a".to_string(),
                policy: vec!["./bundle.tar.gz".to_string()],
                config: Some(SourceConfig {
                    include: vec!["check-1".to_string()],
                    exclude: Vec::new(),
                }),
                ..PolicySource::default()
            }],
            ..PolicySpec::default()
        };

        let path = write_policy_file(dir, &spec).expect("write policy");
        assert_eq!(path, dir.join("policy.yaml"));

        let text = std::fs::read_to_string(&path).expect("read");
        assert!(text.contains("name: C2P Policy"));
        let back: PolicySpec = serde_yaml::from_str(&text).expect("parse yaml");
        assert_eq!(back, spec);
    }

    #[cfg(unix)]
    #[test]
    fn policy_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("temp dir");
        let dir = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let path = write_policy_file(dir, &PolicySpec::default()).expect("write policy");
        let mode = std::fs::metadata(&path).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn missing_directory_reports_target_path() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = Utf8Path::from_path(tmp.path())
            .expect("utf8 path")
            .join("missing");
        let err = write_policy_file(&dir, &PolicySpec::default()).unwrap_err();
        assert!(err.to_string().contains("policy.yaml"));
    }
}
