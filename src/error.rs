use thiserror::Error;

/// Unified error type for srcver operations.
///
/// Resolvers themselves fail soft (they return `None` and the next strategy
/// runs); this type covers the genuinely fatal cases around them, such as an
/// unreadable or malformed configuration file.
#[derive(Error, Debug)]
pub enum SrcverError {
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in srcver
pub type Result<T> = std::result::Result<T, SrcverError>;
