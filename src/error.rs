use thiserror::Error;

/// Errors raised while building a slider from its configuration.
///
/// Navigation itself never fails: out-of-range or redundant requests and
/// vetoed `change` events are silent no-ops. Only malformed configuration
/// surfaces here.
#[derive(Debug, Error)]
pub enum SlidesError {
    /// The configuration lists no slides
    #[error("a slideshow needs at least one slide")]
    NoSlides,

    /// No strategy is registered under the requested name
    #[error("unknown UI strategy: {0}")]
    UnknownUi(String),

    /// A `ui-` option is present but holds the wrong kind of value
    #[error("invalid value for ui option `{key}`: expected {expected}")]
    InvalidOption { key: String, expected: &'static str },

    /// A `ui-` option holds a value the strategy cannot use
    #[error("ui option `{key}` out of range: {message}")]
    OptionOutOfRange { key: String, message: String },

    /// The configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SlidesError>;
