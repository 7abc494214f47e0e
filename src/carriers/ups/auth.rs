use crate::carriers::ups::mapper;
use crate::carriers::ups::wire::UpsTokenResponse;
use crate::config::UpsConfig;
use crate::domain::ports::{Clock, HttpMethod, HttpRequest, HttpTransport};
use crate::utils::error::{AppError, FieldIssue, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Refresh this long before the carrier-side expiry, so a token never expires
/// mid-flight.
const SAFETY_WINDOW_MS: i64 = 30_000;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Client-credentials OAuth client holding at most one cached bearer token.
///
/// The lock guards only the cache slot and is never held across the network
/// call, so concurrent cache misses may each fetch a token. The duplicate
/// request is idempotent and carrier-side side-effect-free; there is no
/// single-flight coalescing.
pub struct UpsOAuthClient<T, C> {
    transport: Arc<T>,
    config: UpsConfig,
    clock: C,
    cached: Mutex<Option<CachedToken>>,
}

impl<T: HttpTransport, C: Clock> UpsOAuthClient<T, C> {
    pub fn new(transport: Arc<T>, config: UpsConfig, clock: C) -> Self {
        Self {
            transport,
            config,
            clock,
            cached: Mutex::new(None),
        }
    }

    /// Returns the cached token while it is still valid under the safety
    /// window, otherwise fetches a fresh one and replaces the cache.
    pub async fn get_access_token(&self) -> Result<String> {
        {
            let cached = self.cached.lock().await;
            if let Some(entry) = cached.as_ref() {
                let refresh_at = entry.expires_at - Duration::milliseconds(SAFETY_WINDOW_MS);
                if self.clock.now() < refresh_at {
                    return Ok(entry.token.clone());
                }
            }
        }

        tracing::debug!("requesting new UPS OAuth token");
        let response = self.request_token().await?;
        // The cast saturates and chrono's arithmetic is checked, so a
        // schema-valid but absurd lifetime surfaces as an error rather than
        // overflowing the expiry instant.
        let expires_at = Duration::try_milliseconds((response.expires_in * 1000.0) as i64)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| AppError::MalformedResponse {
                message: "UPS OAuth response carried an unusable token lifetime".to_string(),
                issues: vec![FieldIssue::new(
                    "expires_in",
                    "does not yield a representable expiry instant",
                )],
                source: None,
            })?;

        let mut cached = self.cached.lock().await;
        *cached = Some(CachedToken {
            token: response.access_token.clone(),
            expires_at,
        });
        Ok(response.access_token)
    }

    async fn request_token(&self) -> Result<UpsTokenResponse> {
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            self.config.client_id, self.config.client_secret
        ));

        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        headers.insert("Authorization".to_string(), format!("Basic {credentials}"));

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.config.oauth_url.clone(),
            headers,
            body: Some("grant_type=client_credentials".to_string()),
            timeout: self.config.timeout,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| AppError::from_transport("UPS OAuth request", e))?;

        if response.status >= 400 {
            return Err(AppError::Auth {
                message: "UPS OAuth request failed".to_string(),
                status: Some(response.status),
                body: Some(response.body),
            });
        }

        mapper::parse_token_response(&response.body)
    }
}
