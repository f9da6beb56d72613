//! Fuzz target for scan result parsing and evidence mapping.
//!
//! Goal: parsing arbitrary bytes as a scan report, and mapping any report that parses,
//! should **never panic**. Parse errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_report_parser
//! ```

#![no_main]

use conforma_types::Report;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Keep inputs small so each iteration stays fast
    if data.len() > 64 * 1024 {
        return;
    }

    let Ok(report) = serde_json::from_slice::<Report>(data) else {
        return;
    };

    if let Ok(evidence) = conforma_domain::to_evidence(&report, "check-fuzz") {
        assert_eq!(
            evidence.scan_activity.num_files,
            Some(report.file_paths.len() as i32)
        );
        let _ = serde_json::to_vec(&evidence);
    }

    let subjects = conforma_domain::subjects_for_report(&report);
    assert_eq!(subjects.len(), report.file_paths.len());
});
