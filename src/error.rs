use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entry directory {} has a name that is not valid UTF-8", path.display())]
    NonUtf8Entry { path: PathBuf },

    #[error("entry {entry:?} is missing {}", path.display())]
    MissingArtifact { entry: String, path: PathBuf },

    #[error("malformed metadata in {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata in {} is not a JSON object", path.display())]
    MetadataNotObject { path: PathBuf },

    #[error("cannot serialize article to {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CleanerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
