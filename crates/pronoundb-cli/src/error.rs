//! Error types for the pronoundb CLI

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Lookup failed
    Client(pronoundb_client::PronounDbError),
    /// Configuration error
    Config(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(e) => write!(f, "{}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<pronoundb_client::PronounDbError> for CliError {
    fn from(e: pronoundb_client::PronounDbError) -> Self {
        Self::Client(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for CliError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("missing TWITCH_CLIENT_ID".to_string());
        assert_eq!(format!("{}", err), "Configuration error: missing TWITCH_CLIENT_ID");
    }

    #[test]
    fn test_client_error_passes_message_through() {
        let err = CliError::from(pronoundb_client::PronounDbError::UnknownCode {
            platform: Some(pronoundb_client::Platform::Discord),
            code: "zz".to_string(),
        });
        assert_eq!(format!("{}", err), "Unknown pronoun code for discord user: \"zz\"");
        assert!(std::error::Error::source(&err).is_some());
    }
}
