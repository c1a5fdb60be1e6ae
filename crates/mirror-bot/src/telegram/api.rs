//! Bot API HTTP client
//!
//! Every method is a JSON `POST {api_url}/bot{token}/{method}` answered with
//! the [`ApiResponse`] envelope.

use std::time::Duration;

use mirror_core::TransportError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::types::{ApiResponse, GetUpdates, LinkPreviewOptions, SendMessage, Update, User, PARSE_MODE};

/// Update kinds the bot subscribes to
pub const ALLOWED_UPDATES: &[&str] = &["message", "channel_post", "edited_channel_post"];

/// Extra time on top of the long-poll timeout before the HTTP request is
/// abandoned
const POLL_GRACE: Duration = Duration::from_secs(10);

pub type ApiResult<T> = Result<T, TransportError>;

/// Thin client over the Bot API
pub struct BotApi {
    client: reqwest::Client,
    base_url: String,
}

impl BotApi {
    /// Create a client for `token` against `api_url` (without trailing slash)
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        })
    }

    /// Call `method` with `params` and decode its result
    #[instrument(skip(self, params), level = "debug")]
    pub async fn call<P, R>(&self, method: &str, params: &P) -> ApiResult<R>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.call_with_timeout(method, params, None).await
    }

    async fn call_with_timeout<P, R>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> ApiResult<R>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.base_url);
        let mut request = self.client.post(&url).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        // The token is part of the URL; never log it
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        let envelope: ApiResponse<R> = serde_json::from_slice(&body).map_err(|e| {
            TransportError::Decode(format!("{method}: HTTP {status}: {e}"))
        })?;
        debug!(method, status = status.as_u16(), ok = envelope.ok, "Bot API call");

        into_result(envelope)
    }

    /// Identity of the bot, used to check the token at startup
    pub async fn get_me(&self) -> ApiResult<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> ApiResult<Vec<Update>> {
        let params = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call_with_timeout(
            "getUpdates",
            &params,
            Some(Duration::from_secs(timeout_secs) + POLL_GRACE),
        )
        .await
    }

    /// Send an HTML message; used for command replies
    pub async fn send_message(&self, chat_id: i64, html: &str, link_preview: bool) -> ApiResult<()> {
        let params = SendMessage {
            chat_id,
            text: html,
            parse_mode: PARSE_MODE,
            link_preview_options: LinkPreviewOptions {
                is_disabled: !link_preview,
            },
        };
        self.call::<_, serde_json::Value>("sendMessage", &params)
            .await
            .map(|_| ())
    }
}

/// Map the envelope to the result or the matching transport error
pub fn into_result<R>(envelope: ApiResponse<R>) -> ApiResult<R> {
    if envelope.ok {
        return envelope
            .result
            .ok_or_else(|| TransportError::Decode("ok response without result".to_string()));
    }

    if let Some(retry_after) = envelope.parameters.as_ref().and_then(|p| p.retry_after) {
        return Err(TransportError::RateLimited {
            retry_after: Duration::from_secs(retry_after),
        });
    }

    Err(TransportError::api(
        envelope.error_code.unwrap_or_default(),
        envelope
            .description
            .unwrap_or_else(|| "no description".to_string()),
    ))
}
