use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures raised while loading results or producing evidence.
///
/// Every variant aborts the current load or aggregation; nothing here is retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("i/o error at {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scan results for {file}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("number of files ({count}) exceeds the maximum value for an int32 ({})", i32::MAX)]
    Overflow { count: usize },

    #[error("failed to serialize evidence for check {check_id}")]
    Serialization {
        check_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PipelineError {
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
