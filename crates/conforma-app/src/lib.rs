//! Use case orchestration for conforma-pvp.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! settings layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod aggregate;
mod generate;
mod output;
mod provider;

pub use aggregate::Aggregator;
pub use generate::{GenerateOutput, run_generate};
pub use output::{parse_catalog_json, serialize_result, write_output};
pub use provider::{ConformaProvider, PolicyProvider};
