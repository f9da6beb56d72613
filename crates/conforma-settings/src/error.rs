use camino::Utf8PathBuf;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is not configured")]
    Missing { key: &'static str },

    #[error("path {path:?}: {error}")]
    Path {
        key: &'static str,
        path: Utf8PathBuf,
        error: std::io::Error,
    },

    #[error("bundle-location cannot be empty")]
    BundleLocationEmpty,

    #[error("invalid provider configuration: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Every problem found by one validation pass.
#[derive(Debug, Default)]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl ConfigErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, err: ConfigError) {
        self.0.push(err);
    }

    pub(crate) fn into_result(self) -> Result<(), ConfigErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}
