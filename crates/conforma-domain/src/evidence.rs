//! Map a scan report onto an OCSF Scan Activity evidence record.

use conforma_types::{
    Evidence, Metadata, Observable, PipelineError, Policy, Product, Report, ScanActivity, ids,
};

use crate::status::report_status;

/// Build the evidence record for `report`, tagging the policy with `check_id`.
///
/// Fails only when the report lists more files than an OCSF `num_files` (int32) holds,
/// or when the policy spec cannot be re-encoded.
pub fn to_evidence(report: &Report, check_id: &str) -> Result<Evidence, PipelineError> {
    let num_files = checked_file_count(report.file_paths.len())?;
    let (status, status_id) = report_status(report);

    let policy_data =
        serde_json::to_string(&report.policy).map_err(|source| PipelineError::Serialization {
            check_id: check_id.to_string(),
            source,
        })?;

    let observables = report
        .file_paths
        .iter()
        .map(|file| Observable {
            name: Some(file.file_path.clone()),
            kind: Some(ids::OCSF_OBSERVABLE_FILE_NAME.to_string()),
            type_id: ids::OCSF_OBSERVABLE_TYPE_ID_FILE_NAME,
        })
        .collect();

    let scan_activity = ScanActivity {
        activity_id: 0,
        activity_name: Some(String::new()),
        category_name: Some(ids::OCSF_CATEGORY_NAME.to_string()),
        category_uid: ids::OCSF_CATEGORY_UID,
        class_name: Some(ids::OCSF_CLASS_NAME.to_string()),
        class_uid: ids::OCSF_CLASS_UID,
        metadata: Metadata {
            uid: Some(evidence_uid(&report.policy.name)),
            product: Product {
                name: Some(ids::PRODUCT_NAME.to_string()),
                vendor_name: Some(ids::VENDOR_NAME.to_string()),
                version: Some(report.ec_version.clone()),
            },
            version: report.ec_version.clone(),
            log_provider: Some(ids::PRODUCT_NAME.to_string()),
        },
        num_files: Some(num_files),
        observables,
        severity: Some(ids::OCSF_SEVERITY_UNKNOWN.to_string()),
        severity_id: ids::OCSF_SEVERITY_ID_UNKNOWN,
        status: Some(status.to_string()),
        status_id: Some(status_id),
        time: epoch_millis(report),
        type_name: Some(String::new()),
        type_uid: ids::OCSF_TYPE_UID_COMPLETED_SCAN,
    };

    Ok(Evidence {
        scan_activity,
        policy: Policy {
            name: Some(report.policy.name.clone()),
            uid: Some(check_id.to_string()),
            data: Some(policy_data),
            desc: Some(report.policy.description.clone()),
        },
        action: Some(ids::OCSF_ACTION_OBSERVED.to_string()),
        action_id: Some(ids::OCSF_ACTION_ID_OBSERVED),
    })
}

/// Convert a file count to the OCSF int32 representation without truncating.
pub fn checked_file_count(count: usize) -> Result<i32, PipelineError> {
    i32::try_from(count).map_err(|_| PipelineError::Overflow { count })
}

pub fn evidence_uid(policy_name: &str) -> String {
    format!("{}-{policy_name}", ids::EVIDENCE_UID_PREFIX)
}

fn epoch_millis(report: &Report) -> i64 {
    report
        .effective_time
        .unix_timestamp_nanos()
        .div_euclid(1_000_000) as i64
}
