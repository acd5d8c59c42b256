//! Error types for the PronounDB client

use std::fmt;

use crate::platform::Platform;

/// The request in a lookup chain that an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `GET /api/v1/lookup` against PronounDB
    Lookup,
    /// Twitter handle to numeric id via tweeterid
    UsernameTranslation,
    /// Twitch client-credentials token request
    TwitchToken,
    /// Twitch Helix `/users` request
    TwitchUserLookup,
    /// GitHub profile page fetch
    ProfilePage,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lookup => "pronoun lookup",
            Self::UsernameTranslation => "username translation",
            Self::TwitchToken => "twitch token request",
            Self::TwitchUserLookup => "twitch user lookup",
            Self::ProfilePage => "profile page fetch",
        };
        f.write_str(name)
    }
}

/// Coarse classification of [`PronounDbError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    MalformedResponse,
    UnknownCode,
    Auth,
    Resolution,
}

/// Errors that can occur while resolving a user and looking up their pronouns
#[derive(Debug)]
pub enum PronounDbError {
    /// The underlying HTTP client could not be constructed
    Build(Box<reqwest::Error>),
    /// HTTP request failed before a response was received
    Http {
        platform: Platform,
        stage: Stage,
        source: Box<reqwest::Error>,
    },
    /// Server answered with a non-success status
    Status {
        platform: Platform,
        stage: Stage,
        status: reqwest::StatusCode,
    },
    /// Response body was not the JSON shape we expected
    MalformedResponse {
        platform: Platform,
        stage: Stage,
        source: serde_json::Error,
    },
    /// PronounDB returned a code outside the known table
    UnknownCode {
        platform: Option<Platform>,
        code: String,
    },
    /// Twitch refused or garbled the client-credentials token request
    Auth {
        detail: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// The platform has no account matching the given identifier
    Resolution { platform: Platform, detail: String },
}

impl PronounDbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Build(_) | Self::Http { .. } | Self::Status { .. } => ErrorKind::Transport,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::UnknownCode { .. } => ErrorKind::UnknownCode,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Resolution { .. } => ErrorKind::Resolution,
        }
    }

    /// Platform the failing call was made for, when known
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Self::Http { platform, .. }
            | Self::Status { platform, .. }
            | Self::MalformedResponse { platform, .. }
            | Self::Resolution { platform, .. } => Some(*platform),
            Self::UnknownCode { platform, .. } => *platform,
            Self::Auth { .. } => Some(Platform::Twitch),
            Self::Build(_) => None,
        }
    }

    pub(crate) fn http(platform: Platform, stage: Stage, err: reqwest::Error) -> Self {
        Self::Http {
            platform,
            stage,
            source: Box::new(err),
        }
    }

    pub(crate) fn unknown_code(code: impl Into<String>) -> Self {
        Self::UnknownCode {
            platform: None,
            code: code.into(),
        }
    }

    /// Attach the platform a code was returned for
    pub(crate) fn for_platform(self, platform: Platform) -> Self {
        match self {
            Self::UnknownCode { code, .. } => Self::UnknownCode {
                platform: Some(platform),
                code,
            },
            other => other,
        }
    }

    pub(crate) fn resolution(platform: Platform, detail: impl Into<String>) -> Self {
        Self::Resolution {
            platform,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PronounDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build(err) => write!(f, "Failed to build HTTP client: {err}"),
            Self::Http {
                platform,
                stage,
                source,
            } => write!(f, "{platform} {stage} HTTP error: {source}"),
            Self::Status {
                platform,
                stage,
                status,
            } => write!(f, "{platform} {stage} returned status {status}"),
            Self::MalformedResponse {
                platform,
                stage,
                source,
            } => write!(f, "{platform} {stage} returned malformed response: {source}"),
            Self::UnknownCode {
                platform: Some(platform),
                code,
            } => write!(f, "Unknown pronoun code for {platform} user: {code:?}"),
            Self::UnknownCode {
                platform: None,
                code,
            } => write!(f, "Unknown pronoun code: {code:?}"),
            Self::Auth { detail, .. } => write!(f, "Twitch authentication failed: {detail}"),
            Self::Resolution { platform, detail } => {
                write!(f, "Could not resolve {platform} user: {detail}")
            }
        }
    }
}

impl std::error::Error for PronounDbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build(source) | Self::Http { source, .. } => Some(source.as_ref()),
            Self::MalformedResponse { source, .. } => Some(source),
            Self::Auth {
                source: Some(source),
                ..
            } => Some(&**source),
            _ => None,
        }
    }
}

/// Result type for PronounDB client operations
pub type Result<T> = std::result::Result<T, PronounDbError>;
