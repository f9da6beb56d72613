//! Pass/fail resolution for file results and reports.
//!
//! The file-level result and the report-level status are computed independently and
//! can disagree: a report flagged successful may still contain a file with violations.
//! Both are kept as-is.

use conforma_types::{FileResult, Report, SubjectResult, ids};

/// `Pass` only when the file is flagged successful and carries no violations.
pub fn file_result(file: &FileResult) -> SubjectResult {
    if file.success && file.violations.is_empty() {
        SubjectResult::Pass
    } else {
        SubjectResult::Fail
    }
}

/// OCSF status label and id for a report. Trusts the report-level flag only.
pub fn report_status(report: &Report) -> (&'static str, i32) {
    if report.success {
        (ids::STATUS_SUCCESS, ids::STATUS_ID_SUCCESS)
    } else {
        (ids::STATUS_FAILURE, ids::STATUS_ID_FAILURE)
    }
}

/// Human-readable reason for a file's resolved result.
pub fn reason(file: &FileResult, result: SubjectResult) -> String {
    let messages = match result {
        SubjectResult::Pass => &file.successes,
        SubjectResult::Fail => &file.violations,
    };

    if messages.is_empty() {
        return ids::REASON_FALLBACK.to_string();
    }

    messages
        .iter()
        .map(|m| m.message.as_str())
        .collect::<Vec<_>>()
        .join(ids::REASON_DELIMITER)
}
