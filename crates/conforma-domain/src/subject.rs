use conforma_types::{FileResult, Report, Subject, ids};

use crate::status::{file_result, reason};

/// One subject per file result, in report order.
pub fn subjects_for_report(report: &Report) -> Vec<Subject> {
    report
        .file_paths
        .iter()
        .map(|file| subject_for_file(report, file))
        .collect()
}

pub fn subject_for_file(report: &Report, file: &FileResult) -> Subject {
    let result = file_result(file);
    Subject {
        title: format!("{} assessment for {}", report.policy.name, file.file_path),
        kind: ids::SUBJECT_TYPE_RESOURCE.to_string(),
        resource_id: file.file_path.clone(),
        result,
        evaluated_on: report.effective_time,
        reason: reason(file, result),
    }
}
