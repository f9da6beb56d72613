//! Filesystem adapters: discover scan results, write evidence and policy files.
//!
//! This crate is allowed to do filesystem IO. It does not spawn processes; the scan
//! engine and the policy compiler are run by the caller.

#![forbid(unsafe_code)]

mod evidence;
mod loader;
mod policy_file;
mod templates;

pub use evidence::{evidence_path, file_uri, serialize_evidence, write_evidence};
pub use loader::{ResultIndex, ResultLoader};
pub use policy_file::write_policy_file;
pub use templates::copy_check_templates;
