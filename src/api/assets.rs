//! Asset service client: usage history and the working-hours policy.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{
    Client,
    Url,
    header::{HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    core::{Interval, UsageRecord, WorkingHoursPolicy},
    prelude::*,
};

/// Records requested per page.
const PAGE_SIZE: usize = 1000;

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(base_url: Url, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        let client = Client::builder()
            .user_agent("tally")
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch the complete usage history matching the filters, following
    /// continuation tokens until the service runs out of pages.
    ///
    /// Records the service could not render properly are skipped, not fatal;
    /// a transport or status failure is.
    #[instrument(skip_all, fields(asset_filter = asset_filter, category_filter = category_filter))]
    pub async fn query_usage_history(
        &self,
        asset_filter: &str,
        category_filter: &str,
        range: Interval,
    ) -> Result<Vec<UsageRecord>> {
        let mut records = Vec::new();
        let mut continuation_token = None;
        let mut total_count = None;
        let mut n_pages = 0_usize;
        loop {
            let response = self
                .post_query_page(&QueryUsageHistoryRequest {
                    asset_filter,
                    category_filter,
                    from: range.start,
                    to: range.end,
                    take: PAGE_SIZE,
                    continuation_token: continuation_token.as_deref(),
                })
                .await?;
            n_pages += 1;
            records.extend(response.usage_history);
            total_count = total_count.or(response.total_count);
            if response.continuation_token.is_none() {
                break;
            }
            continuation_token = response.continuation_token;
        }
        if let Some(total_count) = total_count
            && total_count > records.len()
        {
            warn!(n_skipped = total_count - records.len(), "skipped malformed usage records");
        }
        info!(n_records = records.len(), n_pages, "fetched the usage history");
        Ok(records)
    }

    async fn post_query_page(
        &self,
        request: &QueryUsageHistoryRequest<'_>,
    ) -> Result<QueryUsageHistoryResponse> {
        self.client
            .post(self.url("v1/query-usage-history"))
            .json(request)
            .send()
            .await
            .context("failed to call the usage history endpoint")?
            .error_for_status()
            .context("the usage history query failed")?
            .json()
            .await
            .context("failed to deserialize the usage history response")
    }

    #[instrument(skip_all)]
    pub async fn get_working_hours_policy(&self) -> Result<WorkingHoursPolicy> {
        let policy: WorkingHoursPolicy = self
            .client
            .get(self.url("v1/working-hours-policy"))
            .send()
            .await
            .context("failed to call the working hours endpoint")?
            .error_for_status()
            .context("the working hours query failed")?
            .json()
            .await
            .context("failed to deserialize the working hours response")?;
        info!(start_time = %policy.start_time, end_time = %policy.end_time, "fetched the policy");
        Ok(policy)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryUsageHistoryRequest<'a> {
    asset_filter: &'a str,
    category_filter: &'a str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    take: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    continuation_token: Option<&'a str>,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryUsageHistoryResponse {
    #[serde_as(as = "serde_with::VecSkipError<_>")]
    usage_history: Vec<UsageRecord>,

    #[serde(default)]
    total_count: Option<usize>,

    #[serde(default)]
    continuation_token: Option<String>,
}
