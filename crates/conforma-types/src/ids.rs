//! Stable identifiers and literals shared by the loader, mapper, and aggregator.
//!
//! Downstream consumers match on these values; changing any of them is a breaking change.

// Files
pub const RESULT_FILE_EXTENSION: &str = "json";
pub const EVIDENCE_FILE_EXTENSION: &str = "ocsf";
pub const POLICY_FILE_NAME: &str = "policy.yaml";

// Observations
pub const METHOD_TEST_AUTOMATED: &str = "TEST-AUTOMATED";
pub const LINK_OCSF_FILE: &str = "OCSF_FILE";
pub const SUBJECT_TYPE_RESOURCE: &str = "resource";

// Subject reasons
pub const REASON_FALLBACK: &str = "No reason provided";
/// Literal backslash followed by `n`; consumers split on these two characters.
pub const REASON_DELIMITER: &str = "\\n";

// OCSF scan activity classification
pub const OCSF_CLASS_UID: i32 = 6007;
pub const OCSF_CLASS_NAME: &str = "Scan Activity";
pub const OCSF_CATEGORY_UID: i32 = 6;
pub const OCSF_CATEGORY_NAME: &str = "Application Activity";
pub const OCSF_TYPE_UID_COMPLETED_SCAN: i64 = 60070;
pub const OCSF_SEVERITY_UNKNOWN: &str = "unknown";
pub const OCSF_SEVERITY_ID_UNKNOWN: i32 = 0;
pub const OCSF_ACTION_OBSERVED: &str = "observed";
pub const OCSF_ACTION_ID_OBSERVED: i32 = 3;
pub const OCSF_OBSERVABLE_FILE_NAME: &str = "File Name";
pub const OCSF_OBSERVABLE_TYPE_ID_FILE_NAME: i32 = 7;

// OCSF status
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ID_SUCCESS: i32 = 1;
pub const STATUS_FAILURE: &str = "failure";
pub const STATUS_ID_FAILURE: i32 = 2;

// Producer
pub const VENDOR_NAME: &str = "conforma";
pub const PRODUCT_NAME: &str = "conforma";
pub const EVIDENCE_UID_PREFIX: &str = "c2p-conforma";

// Generated policy
pub const GENERATED_POLICY_NAME: &str = "C2P Policy";
pub const GENERATED_POLICY_DESCRIPTION: &str = "Policy Created by C2P";
