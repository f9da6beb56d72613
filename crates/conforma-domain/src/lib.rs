//! Pure result interpretation (no IO).
//!
//! Input: parsed scan reports and the host's rule catalog.
//! Output: subject verdicts, OCSF evidence records, and the composed policy spec.

#![forbid(unsafe_code)]

pub mod compose;
pub mod evidence;
pub mod status;
pub mod subject;

pub use compose::compose_policy;
pub use evidence::to_evidence;
pub use subject::subjects_for_report;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
