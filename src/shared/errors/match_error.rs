use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read resource list {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MatchError {
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MatchError::Resource {
            path: path.into(),
            source,
        }
    }
}

// Result type alias for convenience
pub type MatchResult<T> = Result<T, MatchError>;
