use camino::{Utf8Path, Utf8PathBuf};
use conforma_types::{Evidence, PipelineError, ids};
use std::fs::OpenOptions;
use std::io::Write;

/// `<dir>/<checkId>.ocsf`
pub fn evidence_path(dir: &Utf8Path, check_id: &str) -> Utf8PathBuf {
    dir.join(format!("{check_id}.{}", ids::EVIDENCE_FILE_EXTENSION))
}

/// Compact JSON, the form downstream collectors ingest.
pub fn serialize_evidence(check_id: &str, evidence: &Evidence) -> Result<Vec<u8>, PipelineError> {
    serde_json::to_vec(evidence).map_err(|source| PipelineError::Serialization {
        check_id: check_id.to_string(),
        source,
    })
}

/// Serialize and write evidence for `check_id`, replacing any previous file.
///
/// Concurrent writers targeting the same directory and check id are not coordinated.
pub fn write_evidence(
    dir: &Utf8Path,
    check_id: &str,
    evidence: &Evidence,
) -> Result<Utf8PathBuf, PipelineError> {
    let data = serialize_evidence(check_id, evidence)?;
    let path = evidence_path(dir, check_id);
    write_private(&path, &data).map_err(|e| PipelineError::io(path.clone(), e))?;
    Ok(path)
}

pub fn file_uri(path: &Utf8Path) -> String {
    format!("file://{path}")
}

pub(crate) fn write_private(path: &Utf8Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.flush()
}
