//! Wire types for the PronounDB and Twitch APIs

use serde::Deserialize;

/// Body of `GET /api/v1/lookup`
#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    pub(crate) pronouns: String,
}

/// Body of Twitch's `POST /oauth2/token`
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: Option<String>,
}

/// Body of Twitch Helix `GET /helix/users`
///
/// `data` may be absent or `null`; both mean no matching user.
#[derive(Debug, Deserialize)]
pub(crate) struct HelixUsersResponse {
    #[serde(default)]
    pub(crate) data: Option<Vec<HelixUser>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HelixUser {
    pub(crate) id: String,
}
