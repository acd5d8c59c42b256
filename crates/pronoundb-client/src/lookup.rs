//! PronounDB `/api/v1/lookup` transport

use tracing::debug;

use crate::error::{PronounDbError, Result, Stage};
use crate::platform::Platform;
use crate::types::LookupResponse;

/// Fetch the raw pronoun code PronounDB stores for an already-resolved id
pub(crate) async fn fetch_pronoun_code(
    http: &reqwest::Client,
    base_url: &str,
    platform: Platform,
    resolved_id: &str,
) -> Result<String> {
    let url = format!(
        "{}/api/v1/lookup?platform={}&id={}",
        base_url,
        platform.tag(),
        urlencoding::encode(resolved_id)
    );

    debug!(platform = %platform, id = resolved_id, "Looking up pronouns");

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| PronounDbError::http(platform, Stage::Lookup, e))?;

    if !response.status().is_success() {
        return Err(PronounDbError::Status {
            platform,
            stage: Stage::Lookup,
            status: response.status(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| PronounDbError::http(platform, Stage::Lookup, e))?;

    let data: LookupResponse =
        serde_json::from_str(&body).map_err(|e| PronounDbError::MalformedResponse {
            platform,
            stage: Stage::Lookup,
            source: e,
        })?;

    Ok(data.pronouns)
}
