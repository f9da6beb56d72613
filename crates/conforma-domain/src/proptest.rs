//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - file-level pass/fail resolution
//! - reason text joining
//! - evidence counts and report-level status

use crate::evidence::to_evidence;
use crate::status::{file_result, reason, report_status};
use crate::subject::subjects_for_report;
use crate::test_support::report;
use conforma_types::{FileResult, Message, SubjectResult};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Message text without the two-character delimiter so joins can be split back.
fn arb_message() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 '.:-]{1,40}").unwrap()
}

fn arb_messages() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_message(), 0..5)
}

fn arb_file_result() -> impl Strategy<Value = FileResult> {
    (
        prop::string::string_regex("[a-z]{1,8}/[a-z]{1,8}\\.(rego|yaml|json)").unwrap(),
        any::<bool>(),
        arb_messages(),
        arb_messages(),
        arb_messages(),
    )
        .prop_map(|(path, success, violations, warnings, successes)| FileResult {
            file_path: path,
            violations: violations.into_iter().map(Message::new).collect(),
            warnings: warnings.into_iter().map(Message::new).collect(),
            success_count: successes.len() as i64,
            successes: successes.into_iter().map(Message::new).collect(),
            success,
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn pass_iff_success_and_no_violations(file in arb_file_result()) {
        let expected = file.success && file.violations.is_empty();
        prop_assert_eq!(file_result(&file) == SubjectResult::Pass, expected);
    }

    #[test]
    fn reason_splits_back_into_the_chosen_messages(file in arb_file_result()) {
        let result = file_result(&file);
        let chosen = match result {
            SubjectResult::Pass => &file.successes,
            SubjectResult::Fail => &file.violations,
        };
        let text = reason(&file, result);

        prop_assert!(!text.contains('\n'));
        if chosen.is_empty() {
            prop_assert_eq!(text, "No reason provided");
        } else {
            let parts: Vec<&str> = text.split("\\n").collect();
            let expected: Vec<&str> = chosen.iter().map(|m| m.message.as_str()).collect();
            prop_assert_eq!(parts, expected);
        }
    }

    #[test]
    fn evidence_counts_every_file(files in prop::collection::vec(arb_file_result(), 0..20)) {
        let r = report("Example", files);
        let evidence = to_evidence(&r, "check-1").unwrap();
        prop_assert_eq!(evidence.scan_activity.num_files, Some(r.file_paths.len() as i32));
        prop_assert_eq!(evidence.scan_activity.observables.len(), r.file_paths.len());
        prop_assert_eq!(subjects_for_report(&r).len(), r.file_paths.len());
    }

    #[test]
    fn report_status_only_reads_the_report_flag(
        files in prop::collection::vec(arb_file_result(), 0..10),
        success in any::<bool>(),
    ) {
        let mut r = report("Example", files);
        r.success = success;
        let expected = if success { ("success", 1) } else { ("failure", 2) };
        prop_assert_eq!(report_status(&r), expected);
    }
}
