use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("{count} options given, at most {limit} are supported")]
    TooManyOptions { count: usize, limit: usize },
    #[error("compiled pattern is not valid: {source}\n  pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },
    #[error("matching failed: {0}")]
    Match(#[source] fancy_regex::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Check(#[from] CheckError),
}
