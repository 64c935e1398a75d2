//! Endpoint fallback sequencing
//!
//! One logical query fans out over an ordered list of candidate endpoints,
//! and each candidate over an ordered list of transports (direct request,
//! then relay passthroughs). Sequencing is strictly sequential - no racing,
//! so relays see no duplicate load and an authoritative 401/403 can stop
//! everything before another request goes out. There is no backoff and no
//! retrying beyond the fixed lists; each request carries the client's
//! timeout and a timed-out call simply advances the sequence.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::data_fetcher::endpoints::{EndpointConfig, Operation};
use crate::data_fetcher::envelope::unwrap_records;
use crate::data_fetcher::transport::ApiAccess;
use crate::error::AppError;

/// Creates the shared HTTP client with an explicit per-request timeout and
/// connection pooling.
pub fn create_http_client(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Resolves logical queries against the candidate/transport fallback lists
#[derive(Debug, Clone)]
pub struct FallbackSequencer {
    client: Client,
    access: ApiAccess,
    endpoints: EndpointConfig,
}

impl FallbackSequencer {
    pub fn new(client: Client, access: ApiAccess, endpoints: EndpointConfig) -> Self {
        Self {
            client,
            access,
            endpoints,
        }
    }

    pub fn access(&self) -> &ApiAccess {
        &self.access
    }

    /// Resolve one logical query into a raw record collection.
    ///
    /// Soft operations degrade to an empty collection when every candidate
    /// fails; the results operation propagates an error unless at least one
    /// candidate answered with a clean (if empty) success.
    #[instrument(skip(self), fields(operation = op.name()))]
    pub async fn resolve(&self, op: Operation, game_id: Option<&str>) -> Result<Vec<Value>, AppError> {
        let candidates = self.endpoints.candidates(op, &self.access, game_id);
        self.resolve_with_candidates(op, &candidates, game_id).await
    }

    /// Same sequencing over an explicit candidate list. Split out so the
    /// fallback behavior is testable against arbitrary endpoints.
    pub async fn resolve_with_candidates(
        &self,
        op: Operation,
        candidates: &[String],
        game_id: Option<&str>,
    ) -> Result<Vec<Value>, AppError> {
        let mut last_error: Option<AppError> = None;
        let mut saw_empty_success = false;

        'candidates: for candidate in candidates {
            for transport_url in self.endpoints.transports(candidate) {
                match self.attempt(&transport_url).await {
                    Ok(body) => {
                        let records = records_for(op, body);
                        if records.is_empty() && op.empty_is_failure() {
                            // A clean 2xx with zero records is indistinguishable
                            // from the wrong dialect's endpoint: next candidate.
                            debug!(%candidate, "Empty success, advancing to next candidate");
                            saw_empty_success = true;
                            continue 'candidates;
                        }
                        debug!(
                            %candidate,
                            records = records.len(),
                            "Resolved {}",
                            op.name()
                        );
                        return Ok(records);
                    }
                    Err(e) if e.is_auth_error() => {
                        // Authoritative rejection: no further transports or
                        // candidates may be attempted.
                        error!(%candidate, "Credential rejected, aborting {}", op.name());
                        return Err(e);
                    }
                    Err(e) => {
                        warn!(
                            url = %transport_url,
                            error = %e,
                            "Transport failed, trying next"
                        );
                        last_error = Some(e);
                    }
                }
            }
        }

        if op.is_soft() || saw_empty_success {
            debug!("All candidates exhausted for {}, returning empty", op.name());
            return Ok(Vec::new());
        }
        Err(last_error
            .unwrap_or_else(|| AppError::results_unavailable(game_id.unwrap_or("unknown"))))
    }

    /// Issue one GET over one transport and parse the body into JSON.
    /// Status triage: 401/403 are authoritative, everything else non-2xx is
    /// a transport-level failure for the sequencer to step past.
    async fn attempt(&self, url: &str) -> Result<Value, AppError> {
        debug!("Requesting {url}");
        let response = match self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.access.auth_header)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return Err(if e.is_timeout() {
                    AppError::network_timeout(url)
                } else if e.is_connect() {
                    AppError::network_connection(url, e.to_string())
                } else {
                    AppError::ApiFetch(e)
                });
            }
        };

        let status = response.status();
        debug!("Response status: {status}");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let reason = status.canonical_reason().unwrap_or("Credential rejected");
            return Err(AppError::auth_rejected(status.as_u16(), reason, url));
        }
        if !status.is_success() {
            let status_code = status.as_u16();
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            return Err(match status_code {
                404 => AppError::api_not_found(url),
                400..=499 => AppError::api_client_error(status_code, reason, url),
                _ => AppError::api_server_error(status_code, reason, url),
            });
        }

        let text = response.text().await.map_err(AppError::ApiFetch)?;
        if text.trim().is_empty() {
            return Err(AppError::api_no_data("Response body is empty", url));
        }
        serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            warn!("Unparseable body from {url}: {preview}");
            AppError::api_malformed_json(e.to_string(), url)
        })
    }
}

/// Envelope-unwrap a body for one operation. Game-info endpoints answer with
/// a bare detail object (or `{"data": {...}}`) rather than a list; that
/// object counts as a single record.
fn records_for(op: Operation, body: Value) -> Vec<Value> {
    if op == Operation::GameInfo && body.is_object() {
        let records = unwrap_records(body.clone());
        if !records.is_empty() {
            return records;
        }
        let detail = match body.get("data") {
            Some(data) if data.is_object() => data.clone(),
            _ => body,
        };
        if detail.get("id").is_some() || detail.get("gameId").is_some() {
            return vec![detail];
        }
        return Vec::new();
    }
    unwrap_records(body)
}
