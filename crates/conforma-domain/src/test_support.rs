use conforma_types::{FileResult, Message, PolicySpec, Report};
use time::OffsetDateTime;
use time::macros::datetime;

pub const EFFECTIVE_TIME: OffsetDateTime = datetime!(2025-01-02 03:04:05.678 UTC);

pub fn file(path: &str, success: bool, violations: &[&str], successes: &[&str]) -> FileResult {
    FileResult {
        file_path: path.to_string(),
        violations: violations.iter().map(|m| Message::new(*m)).collect(),
        warnings: Vec::new(),
        successes: successes.iter().map(|m| Message::new(*m)).collect(),
        success,
        success_count: successes.len() as i64,
    }
}

pub fn report(policy_name: &str, files: Vec<FileResult>) -> Report {
    Report {
        success: files.iter().all(|f| f.success && f.violations.is_empty()),
        file_paths: files,
        policy: PolicySpec {
            name: policy_name.to_string(),
            description: format!("{policy_name} description"),
            ..PolicySpec::default()
        },
        ec_version: "v0.6.0".to_string(),
        effective_time: EFFECTIVE_TIME,
    }
}
