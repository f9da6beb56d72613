//! Stable DTOs and IDs used across the conforma-pvp workspace.
//!
//! This crate is intentionally boring:
//! - the scan report schema written by the Conforma CLI
//! - the OCSF scan activity evidence record
//! - the host's rule catalog and observation result types
//! - stable string IDs and the error taxonomy

#![forbid(unsafe_code)]

pub mod error;
pub mod ids;
pub mod ocsf;
pub mod policy;
pub mod scan;

pub use error::PipelineError;
pub use ocsf::{Evidence, Metadata, Observable, Policy, Product, ScanActivity};
pub use policy::{
    Check, Link, ObservationByCheck, Parameter, PvpResult, Rule, RuleCatalog, RuleSet, Subject,
    SubjectResult,
};
pub use scan::{FileResult, Message, PolicySource, PolicySpec, Report, SourceConfig};
