//! Error types for Support Relay.

/// Top-level error type for the agent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
///
/// Adapter configs are validated at construction so that missing credentials
/// fail at startup instead of surfacing on the first transport call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Channel-related errors.
///
/// These never escape a channel's `send` — adapters downgrade them to a
/// `false` return plus a warn-level diagnostic at the trait boundary.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("Channel {name} is not configured: {reason}")]
    NotConfigured { name: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Result type alias for the agent.
pub type Result<T> = std::result::Result<T, Error>;
