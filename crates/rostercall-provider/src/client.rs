//! Scheduling-source HTTP client with bounded retry and pagination.
//!
//! Retry policy: auth rejections are fatal and never retried; rate limits
//! honor the provider's Retry-After; other failures wait one second. Every
//! list call drains `links.next` to exhaustion before returning, so callers
//! never aggregate a partial page.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use rostercall_core::config::ProviderConfig;
use rostercall_core::error::{Result, RosterError};
use rostercall_core::traits::PlanSource;
use rostercall_core::types::{PlanRecord, RawAssignment, RawNeededSlot};

use crate::records;

/// Retries after the first attempt.
const MAX_RETRIES: u32 = 3;
/// Fallback backoff when the provider rate-limits without a usable header.
const DEFAULT_RATE_LIMIT_SECS: u64 = 2;
/// Backoff for transient/network failures.
const TRANSIENT_RETRY_SECS: u64 = 1;

/// Basic-auth JSON client for the scheduling source.
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    secret: String,
}

impl ProviderClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            secret: config.secret.clone(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// One GET with the retry policy applied. `Ok(None)` means the resource
    /// does not exist (optional sub-resources are empty, not errors).
    async fn request_with_retry(&self, path: &str) -> Result<Option<Value>> {
        let url = self.url_for(path);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let response = self
                .client
                .get(&url)
                .basic_auth(&self.app_id, Some(&self.secret))
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    match status {
                        401 | 403 => return Err(RosterError::Auth { status }),
                        404 => return Ok(None),
                        429 => {
                            if attempts > MAX_RETRIES {
                                return Err(RosterError::RateLimited { attempts });
                            }
                            let delay = retry_after_secs(resp.headers());
                            tracing::warn!(
                                "⏳ Provider rate limit on {url}, retrying in {delay}s (attempt {attempts})"
                            );
                            tokio::time::sleep(Duration::from_secs(delay)).await;
                        }
                        s if !resp.status().is_success() => {
                            if attempts > MAX_RETRIES {
                                return Err(RosterError::Http(format!(
                                    "unexpected status {s} from {url}"
                                )));
                            }
                            tracing::warn!(
                                "⚠️ Provider returned {s} for {url}, retrying (attempt {attempts})"
                            );
                            tokio::time::sleep(Duration::from_secs(TRANSIENT_RETRY_SECS)).await;
                        }
                        _ => {
                            let body = resp
                                .json::<Value>()
                                .await
                                .map_err(|e| RosterError::Provider(format!("invalid JSON: {e}")))?;
                            return Ok(Some(body));
                        }
                    }
                }
                Err(e) => {
                    if attempts > MAX_RETRIES {
                        return Err(RosterError::Http(format!("request to {url} failed: {e}")));
                    }
                    tracing::warn!("⚠️ Provider request failed ({e}), retrying (attempt {attempts})");
                    tokio::time::sleep(Duration::from_secs(TRANSIENT_RETRY_SECS)).await;
                }
            }
        }
    }

    /// Drain a paginated list endpoint, accumulating `data` rows and
    /// `included` resources across every page.
    async fn fetch_all_pages(&self, path: &str) -> Result<(Vec<Value>, Vec<Value>)> {
        let mut next = Some(path.to_string());
        let mut data = Vec::new();
        let mut included = Vec::new();

        while let Some(url) = next {
            let page = match self.request_with_retry(&url).await? {
                Some(page) => page,
                None => break,
            };
            if let Some(rows) = page["data"].as_array() {
                data.extend(rows.iter().cloned());
            }
            if let Some(extra) = page["included"].as_array() {
                included.extend(extra.iter().cloned());
            }
            next = next_link(&page);
        }

        Ok((data, included))
    }
}

/// Extract the `links.next` href; the provider may return a bare string or
/// an object with an `href` field, and links may be absolute.
fn next_link(page: &Value) -> Option<String> {
    let link = &page["links"]["next"];
    link.as_str()
        .or_else(|| link["href"].as_str())
        .map(String::from)
}

fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_RATE_LIMIT_SECS)
}

#[async_trait]
impl PlanSource for ProviderClient {
    async fn plans_in_range(
        &self,
        service_type_id: &str,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<Vec<PlanRecord>> {
        let path = format!(
            "/service_types/{service_type_id}/plans?filter=after,before&after={}&before={}",
            after.to_rfc3339_opts(SecondsFormat::Secs, true),
            before.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        let (rows, _) = self.fetch_all_pages(&path).await?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let id = row["id"].as_str()?;
                Some(PlanRecord {
                    id: id.to_string(),
                    dates_label: row["attributes"]["dates"].as_str().map(String::from),
                })
            })
            .collect())
    }

    async fn assignments(
        &self,
        service_type_id: &str,
        plan_id: &str,
    ) -> Result<Vec<RawAssignment>> {
        let path = format!(
            "/service_types/{service_type_id}/plans/{plan_id}/team_members?include=person,team,position"
        );
        let (rows, included) = self.fetch_all_pages(&path).await?;
        let index = records::build_included_index(&included);
        Ok(rows
            .iter()
            .map(|row| records::normalize_assignment(row, &index))
            .collect())
    }

    async fn needed_slots(
        &self,
        service_type_id: &str,
        plan_id: &str,
    ) -> Result<Vec<RawNeededSlot>> {
        let path = format!(
            "/service_types/{service_type_id}/plans/{plan_id}/needed_positions?include=team"
        );
        let (rows, included) = self.fetch_all_pages(&path).await?;
        let index = records::build_included_index(&included);
        Ok(rows
            .iter()
            .map(|row| records::normalize_needed_slot(row, &index))
            .collect())
    }
}
