use std::fmt;
use std::str::FromStr;

/// Platforms PronounDB can look users up on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Discord,
    Twitter,
    Twitch,
    Github,
    Minecraft,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Self::Discord,
        Self::Twitter,
        Self::Twitch,
        Self::Github,
        Self::Minecraft,
    ];

    /// The `platform` query value PronounDB expects
    pub fn tag(self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::Twitter => "twitter",
            Self::Twitch => "twitch",
            Self::Github => "github",
            Self::Minecraft => "minecraft",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}

/// Twitch application credentials for the client-credentials grant
#[derive(Clone)]
pub struct TwitchCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl TwitchCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Keep the secret out of logs and panics
impl fmt::Debug for TwitchCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitchCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A user as identified on their own platform
///
/// Each variant carries whatever its resolver needs to produce the identifier
/// PronounDB keys that platform by.
#[derive(Debug, Clone, Copy)]
pub enum PlatformUser<'a> {
    /// Discord user id (snowflake), not `name#discriminator`
    Discord(&'a str),
    /// Twitter handle, without the leading `@`
    Twitter(&'a str),
    /// Twitch login name
    Twitch {
        login: &'a str,
        credentials: &'a TwitchCredentials,
    },
    /// GitHub login
    Github(&'a str),
    /// Minecraft player UUID
    Minecraft(&'a str),
}

impl PlatformUser<'_> {
    pub fn platform(&self) -> Platform {
        match self {
            Self::Discord(_) => Platform::Discord,
            Self::Twitter(_) => Platform::Twitter,
            Self::Twitch { .. } => Platform::Twitch,
            Self::Github(_) => Platform::Github,
            Self::Minecraft(_) => Platform::Minecraft,
        }
    }

    /// The identifier as the caller supplied it
    pub fn native_id(&self) -> &str {
        match self {
            Self::Discord(id)
            | Self::Twitter(id)
            | Self::Github(id)
            | Self::Minecraft(id)
            | Self::Twitch { login: id, .. } => id,
        }
    }
}
