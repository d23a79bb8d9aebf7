//! Sequential region fallback over the lookup service

use banwatch_types::{AccountRecord, LookupError, SuspensionPeriod};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::LookupConfig;
use crate::timestamp::format_timestamp;
use crate::AccountLookup;

const DEFAULT_NICKNAME: &str = "Unknown";

/// What a single region told us.
#[derive(Debug)]
enum RegionOutcome {
    Found(AccountRecord),
    /// Not here, or the region is unhealthy; move on.
    Miss,
}

/// Queries each configured region in order and returns the first account
/// record found.
#[derive(Clone)]
pub struct RegionResolver {
    client: Client,
    config: LookupConfig,
}

impl RegionResolver {
    pub fn new(config: LookupConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn regions(&self) -> &[String] {
        &self.config.regions
    }

    pub async fn resolve(&self, player_id: &str) -> Result<AccountRecord, LookupError> {
        for region in &self.config.regions {
            match self.query_region(player_id, region).await {
                RegionOutcome::Found(record) => {
                    info!(
                        player_id,
                        region = %region,
                        reported_region = %record.region,
                        "Account found"
                    );
                    return Ok(record);
                }
                RegionOutcome::Miss => continue,
            }
        }

        info!(
            player_id,
            regions = self.config.regions.len(),
            "Account not found in any region"
        );
        Err(LookupError::AccountNotFound)
    }

    async fn query_region(&self, player_id: &str, region: &str) -> RegionOutcome {
        let request = self
            .client
            .get(&self.config.base_url)
            .query(&[("uid", player_id), ("region", region)]);

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(region, error = %e, "Lookup request failed, trying next region");
                return RegionOutcome::Miss;
            }
        };

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Lookup response");

        match status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                debug!(region, "Account not found in region, trying next region");
                return RegionOutcome::Miss;
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                warn!(region, "Lookup server error for region, trying next region");
                return RegionOutcome::Miss;
            }
            other => {
                warn!(
                    region,
                    status = other.as_u16(),
                    "Unexpected lookup status, trying next region"
                );
                return RegionOutcome::Miss;
            }
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(region, error = %e, "Unreadable lookup body, trying next region");
                return RegionOutcome::Miss;
            }
        };

        match parse_account(&body, region) {
            Some(record) => RegionOutcome::Found(record),
            None => {
                debug!(region, "Lookup body has no basicInfo, trying next region");
                RegionOutcome::Miss
            }
        }
    }
}

impl AccountLookup for RegionResolver {
    async fn lookup(&self, player_id: &str) -> Result<AccountRecord, LookupError> {
        self.resolve(player_id).await
    }
}

/// Build a record from a `{"basicInfo": {...}}` body.
///
/// This shape carries no ban information, so the account is reported as
/// not banned with a zero-month period.
pub(crate) fn parse_account(body: &Value, queried_region: &str) -> Option<AccountRecord> {
    let info = body.get("basicInfo")?.as_object()?;

    let nickname = info
        .get("nickname")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_NICKNAME)
        .to_string();

    let region = info
        .get("region")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
        .unwrap_or(queried_region)
        .to_string();

    Some(AccountRecord {
        // basicInfo carries no ban field; a hit always reads as clean.
        banned: false,
        nickname,
        period: SuspensionPeriod::Months(0),
        region,
        created_at: format_timestamp(info.get("createAt")),
        last_login: format_timestamp(info.get("lastLoginAt")),
    })
}
