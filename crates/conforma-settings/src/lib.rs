//! Provider configuration parsing, defaulting and validation.
//!
//! Parsing is IO-free. Validation stats the configured paths and nothing else.

#![forbid(unsafe_code)]

mod error;
mod model;
mod resolve;

pub use error::{ConfigError, ConfigErrors};
pub use model::ConformaConfig;
pub use resolve::resolve_config;

/// Parse `conforma.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ConformaConfig> {
    let cfg: ConformaConfig = toml::from_str(input)?;
    Ok(cfg)
}
