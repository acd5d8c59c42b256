//! Per-platform identifier resolution
//!
//! PronounDB keys Twitter, Twitch and GitHub accounts by numeric id, while users
//! usually know each other by handle. Each resolver here turns a handle into
//! that id using the platform's own service. Discord and Minecraft ids are
//! already in the right form and never reach this module.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{PronounDbError, Result, Stage};
use crate::platform::{Platform, TwitchCredentials};
use crate::types::{HelixUsersResponse, TokenResponse};

const SCOPE_ID_MARKER: &str = "data-scope-id=\"";

/// Third-party endpoints used to resolve usernames to ids
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// tweeterid.com form endpoint (handle -> numeric id)
    pub tweeterid_url: String,
    /// Twitch OAuth token endpoint
    pub twitch_token_url: String,
    /// Twitch API root; `/helix/users` is appended
    pub twitch_api_url: String,
    /// GitHub web root; `/{login}` is appended
    pub github_url: String,
}

impl Endpoints {
    pub const TWEETERID_URL: &'static str = "https://tweeterid.com/ajax.php";
    pub const TWITCH_TOKEN_URL: &'static str = "https://id.twitch.tv/oauth2/token";
    pub const TWITCH_API_URL: &'static str = "https://api.twitch.tv";
    pub const GITHUB_URL: &'static str = "https://github.com";
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            tweeterid_url: Self::TWEETERID_URL.to_string(),
            twitch_token_url: Self::TWITCH_TOKEN_URL.to_string(),
            twitch_api_url: Self::TWITCH_API_URL.to_string(),
            github_url: Self::GITHUB_URL.to_string(),
        }
    }
}

/// Translate a Twitter handle into its numeric id via tweeterid
pub(crate) async fn twitter_id(
    http: &reqwest::Client,
    endpoints: &Endpoints,
    handle: &str,
) -> Result<String> {
    let platform = Platform::Twitter;
    let stage = Stage::UsernameTranslation;

    debug!(handle, "Translating Twitter handle");

    let response = http
        .post(&endpoints.tweeterid_url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(format!("input={}", urlencoding::encode(handle)))
        .send()
        .await
        .map_err(|e| PronounDbError::http(platform, stage, e))?;

    if !response.status().is_success() {
        return Err(PronounDbError::Status {
            platform,
            stage,
            status: response.status(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| PronounDbError::http(platform, stage, e))?;
    let id = body.trim();

    // tweeterid answers unknown handles with a plain-text error message
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        warn!(handle, response = id, "tweeterid returned no numeric id");
        return Err(PronounDbError::resolution(
            platform,
            format!("no numeric id for handle {handle:?}"),
        ));
    }

    Ok(id.to_string())
}

/// Exchange application credentials for an app access token
pub(crate) async fn twitch_app_token(
    http: &reqwest::Client,
    endpoints: &Endpoints,
    credentials: &TwitchCredentials,
) -> Result<String> {
    let url = format!(
        "{}?client_id={}&client_secret={}&grant_type=client_credentials",
        endpoints.twitch_token_url,
        urlencoding::encode(&credentials.client_id),
        urlencoding::encode(&credentials.client_secret)
    );

    debug!(client_id = %credentials.client_id, "Requesting Twitch app token");

    let response = http
        .post(&url)
        .send()
        .await
        .map_err(|e| PronounDbError::Auth {
            detail: format!("{} request failed", Stage::TwitchToken),
            source: Some(Box::new(e)),
        })?;

    if !response.status().is_success() {
        return Err(PronounDbError::Auth {
            detail: format!("token endpoint returned status {}", response.status()),
            source: None,
        });
    }

    let body = response.text().await.map_err(|e| PronounDbError::Auth {
        detail: "failed to read token response".to_string(),
        source: Some(Box::new(e)),
    })?;

    let token: TokenResponse = serde_json::from_str(&body).map_err(|e| PronounDbError::Auth {
        detail: "token response is not valid JSON".to_string(),
        source: Some(Box::new(e)),
    })?;

    match token.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(PronounDbError::Auth {
            detail: "token response has no access_token".to_string(),
            source: None,
        }),
    }
}

/// Look up a Twitch login's numeric id with an app access token
pub(crate) async fn twitch_user_id(
    http: &reqwest::Client,
    endpoints: &Endpoints,
    client_id: &str,
    token: &str,
    login: &str,
) -> Result<String> {
    let platform = Platform::Twitch;
    let stage = Stage::TwitchUserLookup;
    let url = format!(
        "{}/helix/users?login={}",
        endpoints.twitch_api_url,
        urlencoding::encode(login)
    );

    debug!(login, "Looking up Twitch user");

    let response = http
        .get(&url)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header("Client-Id", client_id)
        .send()
        .await
        .map_err(|e| PronounDbError::http(platform, stage, e))?;

    if !response.status().is_success() {
        return Err(PronounDbError::Status {
            platform,
            stage,
            status: response.status(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| PronounDbError::http(platform, stage, e))?;

    let users: HelixUsersResponse =
        serde_json::from_str(&body).map_err(|e| PronounDbError::MalformedResponse {
            platform,
            stage,
            source: e,
        })?;

    match users.data.unwrap_or_default().into_iter().next() {
        Some(user) => Ok(user.id),
        None => {
            warn!(login, "Twitch returned no user for login");
            Err(PronounDbError::resolution(
                platform,
                format!("no Twitch user with login {login:?}"),
            ))
        }
    }
}

/// Resolve a Twitch login: app token first, then the user lookup
pub(crate) async fn twitch_id(
    http: &reqwest::Client,
    endpoints: &Endpoints,
    login: &str,
    credentials: &TwitchCredentials,
) -> Result<String> {
    let token = twitch_app_token(http, endpoints, credentials).await?;
    twitch_user_id(http, endpoints, &credentials.client_id, &token, login).await
}

/// Scrape a GitHub login's numeric id from its public profile page
// TODO: replace the scrape with `GET https://api.github.com/users/{login}` and read `id`
pub(crate) async fn github_id(
    http: &reqwest::Client,
    endpoints: &Endpoints,
    login: &str,
) -> Result<String> {
    let platform = Platform::Github;
    let stage = Stage::ProfilePage;
    let url = format!("{}/{}", endpoints.github_url, urlencoding::encode(login));

    debug!(login, "Fetching GitHub profile page");

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| PronounDbError::http(platform, stage, e))?;

    match response.status() {
        StatusCode::NOT_FOUND => {
            return Err(PronounDbError::resolution(
                platform,
                format!("no GitHub user with login {login:?}"),
            ));
        }
        status if !status.is_success() => {
            return Err(PronounDbError::Status {
                platform,
                stage,
                status,
            });
        }
        _ => {}
    }

    let html = response
        .text()
        .await
        .map_err(|e| PronounDbError::http(platform, stage, e))?;

    match extract_scope_id(&html) {
        Some(id) => Ok(id.to_string()),
        None => {
            warn!(login, "data-scope-id marker missing from GitHub profile page");
            Err(PronounDbError::resolution(
                platform,
                format!("profile page for {login:?} has no data-scope-id"),
            ))
        }
    }
}

/// Pull the value of the first `data-scope-id="..."` attribute out of a page
///
/// Returns `None` if the attribute is missing, unterminated, or empty.
pub fn extract_scope_id(html: &str) -> Option<&str> {
    let (_, rest) = html.split_once(SCOPE_ID_MARKER)?;
    let (id, _) = rest.split_once('"')?;
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use httpmock::prelude::*;
    use serde_json::json;

    fn endpoints_for(server: &MockServer) -> Endpoints {
        Endpoints {
            tweeterid_url: server.url("/ajax.php"),
            twitch_token_url: server.url("/oauth2/token"),
            twitch_api_url: server.base_url(),
            github_url: server.base_url(),
        }
    }

    fn credentials() -> TwitchCredentials {
        TwitchCredentials::new("cid", "csecret")
    }

    #[test]
    fn test_extract_scope_id() {
        let html = r#"<div class="x" data-scope-id="456" data-scope-type="User">"#;
        assert_eq!(extract_scope_id(html), Some("456"));
    }

    #[test]
    fn test_extract_scope_id_takes_first_occurrence() {
        let html = r#"data-scope-id="1" ... data-scope-id="2""#;
        assert_eq!(extract_scope_id(html), Some("1"));
    }

    #[test]
    fn test_extract_scope_id_missing_or_broken() {
        assert_eq!(extract_scope_id("<html><body>Not Found</body></html>"), None);
        assert_eq!(extract_scope_id(r#"data-scope-id="123"#), None);
        assert_eq!(extract_scope_id(r#"data-scope-id="""#), None);
        assert_eq!(extract_scope_id(""), None);
    }

    #[tokio::test]
    async fn test_twitter_posts_form_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ajax.php")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body("input=jack");
                then.status(200).body("12\n");
            })
            .await;

        let id = twitter_id(&reqwest::Client::new(), &endpoints_for(&server), "jack")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(id, "12");
    }

    #[tokio::test]
    async fn test_twitter_error_body_is_resolution_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ajax.php");
                then.status(200).body("error");
            })
            .await;

        let err = twitter_id(&reqwest::Client::new(), &endpoints_for(&server), "nobody")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[tokio::test]
    async fn test_twitch_resolves_first_user() {
        let server = MockServer::start_async().await;
        let token = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth2/token")
                    .query_param("client_id", "cid")
                    .query_param("client_secret", "csecret")
                    .query_param("grant_type", "client_credentials");
                then.status(200).json_body(json!({"access_token": "T"}));
            })
            .await;
        let users = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/helix/users")
                    .query_param("login", "thecaptain8771")
                    .header("authorization", "Bearer T")
                    .header("client-id", "cid");
                then.status(200).json_body(json!({"data": [{"id": "123"}]}));
            })
            .await;

        let id = twitch_id(
            &reqwest::Client::new(),
            &endpoints_for(&server),
            "thecaptain8771",
            &credentials(),
        )
        .await
        .unwrap();

        token.assert_async().await;
        users.assert_async().await;
        assert_eq!(id, "123");
    }

    #[tokio::test]
    async fn test_twitch_empty_data_is_resolution_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(json!({"access_token": "T"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/helix/users");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;

        let err = twitch_id(
            &reqwest::Client::new(),
            &endpoints_for(&server),
            "ghost",
            &credentials(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert_eq!(err.platform(), Some(Platform::Twitch));
    }

    #[tokio::test]
    async fn test_twitch_missing_token_is_auth_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200)
                    .json_body(json!({"status": 400, "message": "invalid client secret"}));
            })
            .await;

        let err = twitch_id(
            &reqwest::Client::new(),
            &endpoints_for(&server),
            "thecaptain8771",
            &credentials(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
    }

    #[tokio::test]
    async fn test_twitch_null_data_is_resolution_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/helix/users");
                then.status(200).json_body(json!({"data": null}));
            })
            .await;

        let err = twitch_user_id(
            &reqwest::Client::new(),
            &endpoints_for(&server),
            "cid",
            "T",
            "ghost",
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[tokio::test]
    async fn test_twitch_user_lookup_error_status_is_transport_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/helix/users");
                then.status(401)
                    .json_body(json!({"error": "Unauthorized", "status": 401}));
            })
            .await;

        let err = twitch_user_id(
            &reqwest::Client::new(),
            &endpoints_for(&server),
            "cid",
            "expired",
            "thecaptain8771",
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(
            err,
            PronounDbError::Status {
                stage: Stage::TwitchUserLookup,
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_twitch_user_lookup_bad_json_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/helix/users");
                then.status(200).body("<html>gateway</html>");
            })
            .await;

        let err = twitch_user_id(
            &reqwest::Client::new(),
            &endpoints_for(&server),
            "cid",
            "T",
            "thecaptain8771",
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(err.platform(), Some(Platform::Twitch));
    }

    #[tokio::test]
    async fn test_twitch_token_bad_json_is_auth_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let err = twitch_app_token(&reqwest::Client::new(), &endpoints_for(&server), &credentials())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<serde_json::Error>().is_some());
    }

    #[tokio::test]
    async fn test_twitter_error_status_is_transport_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ajax.php");
                then.status(502);
            })
            .await;

        let err = twitter_id(&reqwest::Client::new(), &endpoints_for(&server), "jack")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(
            err,
            PronounDbError::Status {
                stage: Stage::UsernameTranslation,
                status: StatusCode::BAD_GATEWAY,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_twitch_rejected_credentials_is_auth_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(403).json_body(json!({"message": "invalid client"}));
            })
            .await;

        let err = twitch_app_token(&reqwest::Client::new(), &endpoints_for(&server), &credentials())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_github_scrapes_scope_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/Captain8771");
                then.status(200)
                    .body(r#"<html><meta name="x"><div data-scope-id="456" data-scope-type="User"></div></html>"#);
            })
            .await;

        let id = github_id(&reqwest::Client::new(), &endpoints_for(&server), "Captain8771")
            .await
            .unwrap();

        assert_eq!(id, "456");
    }

    #[tokio::test]
    async fn test_github_missing_marker_is_resolution_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/Captain8771");
                then.status(200).body("<html><body>redesigned</body></html>");
            })
            .await;

        let err = github_id(&reqwest::Client::new(), &endpoints_for(&server), "Captain8771")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[tokio::test]
    async fn test_github_not_found_is_resolution_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/no-such-user");
                then.status(404).body("Not Found");
            })
            .await;

        let err = github_id(&reqwest::Client::new(), &endpoints_for(&server), "no-such-user")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[tokio::test]
    async fn test_github_server_error_is_transport_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/Captain8771");
                then.status(503);
            })
            .await;

        let err = github_id(&reqwest::Client::new(), &endpoints_for(&server), "Captain8771")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
