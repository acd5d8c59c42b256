//! PronounDB client facade

use std::time::Duration;

use tracing::debug;

use crate::error::{PronounDbError, Result};
use crate::lookup::fetch_pronoun_code;
use crate::platform::{PlatformUser, TwitchCredentials};
use crate::pronouns::PronounCode;
use crate::resolve::{self, Endpoints};

/// Default PronounDB instance
pub const DEFAULT_BASE_URL: &str = "https://pronoundb.org";

/// User agent sent with every outbound request
pub const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (+",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// Client for looking up pronouns on PronounDB
///
/// Holds a pooled [`reqwest::Client`] and immutable configuration, so a single
/// instance can serve any number of concurrent lookups. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct PronounDbClient {
    http: reqwest::Client,
    base_url: String,
    capitalize: bool,
    endpoints: Endpoints,
}

impl PronounDbClient {
    /// Create a client for `https://pronoundb.org` with capitalized labels
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn capitalize(&self) -> bool {
        self.capitalize
    }

    /// Get the pronouns of a Discord user by id (not `name#discriminator`)
    pub async fn get_discord_pronouns(&self, id: &str) -> Result<String> {
        self.get_pronouns(&PlatformUser::Discord(id)).await
    }

    /// Get the pronouns of a Twitter user by handle
    ///
    /// The handle is translated to a numeric id through tweeterid.com first.
    pub async fn get_twitter_pronouns(&self, handle: &str) -> Result<String> {
        self.get_pronouns(&PlatformUser::Twitter(handle)).await
    }

    /// Get the pronouns of a Twitch user by login
    ///
    /// Makes two Twitch API calls (app token, then user lookup) before asking
    /// PronounDB. No token is kept between calls.
    pub async fn get_twitch_pronouns(
        &self,
        login: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String> {
        let credentials = TwitchCredentials::new(client_id, client_secret);
        self.get_pronouns(&PlatformUser::Twitch {
            login,
            credentials: &credentials,
        })
        .await
    }

    /// Get the pronouns of a GitHub user by login
    ///
    /// The numeric id is scraped from the user's public profile page.
    pub async fn get_github_pronouns(&self, login: &str) -> Result<String> {
        self.get_pronouns(&PlatformUser::Github(login)).await
    }

    /// Get the pronouns of a Minecraft player by UUID
    pub async fn get_minecraft_pronouns(&self, uuid: &str) -> Result<String> {
        self.get_pronouns(&PlatformUser::Minecraft(uuid)).await
    }

    /// Resolve, look up, and format the display label for any platform user
    pub async fn get_pronouns(&self, user: &PlatformUser<'_>) -> Result<String> {
        let code = self.get_pronoun_code(user).await?;
        Ok(self.display_label(code))
    }

    /// Resolve and look up a user, returning the code without formatting
    pub async fn get_pronoun_code(&self, user: &PlatformUser<'_>) -> Result<PronounCode> {
        let platform = user.platform();
        let resolved_id = self.resolve(user).await?;
        let raw = fetch_pronoun_code(&self.http, &self.base_url, platform, &resolved_id).await?;
        let code = PronounCode::from_code(&raw).map_err(|e| e.for_platform(platform))?;

        debug!(
            platform = %platform,
            id = %resolved_id,
            code = code.code(),
            "Resolved pronouns"
        );

        Ok(code)
    }

    /// Translate a platform-native identifier into the id PronounDB expects
    pub async fn resolve(&self, user: &PlatformUser<'_>) -> Result<String> {
        match *user {
            PlatformUser::Discord(id) | PlatformUser::Minecraft(id) => Ok(id.to_string()),
            PlatformUser::Twitter(handle) => {
                resolve::twitter_id(&self.http, &self.endpoints, handle).await
            }
            PlatformUser::Twitch { login, credentials } => {
                resolve::twitch_id(&self.http, &self.endpoints, login, credentials).await
            }
            PlatformUser::Github(login) => {
                resolve::github_id(&self.http, &self.endpoints, login).await
            }
        }
    }

    /// Label for a code, lowercased when the client was built with `capitalize(false)`
    pub fn display_label(&self, code: PronounCode) -> String {
        if self.capitalize {
            code.label().to_string()
        } else {
            code.label().to_lowercase()
        }
    }
}

/// Builder for [`PronounDbClient`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    capitalize: bool,
    timeout: Option<Duration>,
    endpoints: Endpoints,
    http: Option<reqwest::Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            capitalize: true,
            timeout: None,
            endpoints: Endpoints::default(),
            http: None,
        }
    }
}

impl ClientBuilder {
    /// PronounDB instance to query (default `https://pronoundb.org`)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Return labels as `He/Him` (true, default) or `he/him` (false)
    pub fn capitalize(mut self, capitalize: bool) -> Self {
        self.capitalize = capitalize;
        self
    }

    /// Per-request timeout; unset leaves reqwest's default in place
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the third-party services used for username resolution
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Share an existing connection pool instead of building one
    ///
    /// The client's own user agent and timeout are not applied to it.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<PronounDbClient> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| PronounDbError::Build(Box::new(e)))?
            }
        };

        Ok(PronounDbClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            capitalize: self.capitalize,
            endpoints: self.endpoints,
        })
    }
}
