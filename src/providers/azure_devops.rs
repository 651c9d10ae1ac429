use async_trait::async_trait;
use base64::Engine;

use super::Provider;
use crate::config::BacklogConfig;
use crate::error::{BacklogError, Result};
use crate::model::work_item::{WiqlResponse, WorkItemDetail, WorkItemsResponse};

const API_VERSION: &str = "7.0";
const DETAIL_FIELDS: &str = "System.Id,System.Title,Microsoft.VSTS.Common.Priority,System.State";

pub struct AzureDevOpsProvider {
    project_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl AzureDevOpsProvider {
    pub fn new(config: &BacklogConfig) -> Self {
        Self {
            project_url: project_url(config),
            auth_header: auth_header(config.pat()),
            client: reqwest::Client::new(),
        }
    }

    fn wiql_url(&self) -> String {
        format!("{}/_apis/wit/wiql?api-version={API_VERSION}", self.project_url)
    }

    fn details_url(&self, ids: &[u64]) -> String {
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/_apis/wit/workitems?ids={ids}&fields={DETAIL_FIELDS}&api-version={API_VERSION}",
            self.project_url
        )
    }

    async fn read_body(url: &str, resp: reqwest::Response) -> Result<String> {
        resp.text().await.map_err(|source| BacklogError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// `{org}/{project}` with the project name percent-encoded for the path.
fn project_url(config: &BacklogConfig) -> String {
    format!(
        "{}/{}",
        config.org_url(),
        urlencoding::encode(config.project())
    )
}

/// Basic auth with an empty user name, as personal access tokens expect.
fn auth_header(pat: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!(":{pat}"));
    format!("Basic {encoded}")
}

#[async_trait]
impl Provider for AzureDevOpsProvider {
    fn name(&self) -> &str {
        "Azure DevOps"
    }

    async fn query_ids(&self, wiql: &str) -> Result<Vec<u64>> {
        let url = self.wiql_url();
        let body = serde_json::json!({ "query": wiql });
        tracing::debug!(%url, "submitting WIQL query");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|source| BacklogError::Http {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let text = Self::read_body(&url, resp).await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "WIQL query rejected");
            return Err(BacklogError::QueryRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: WiqlResponse =
            serde_json::from_str(&text).map_err(|source| BacklogError::Decode {
                what: "WIQL response",
                source,
            })?;
        tracing::debug!(count = parsed.work_items.len(), "WIQL query returned");
        Ok(parsed.work_items.into_iter().map(|r| r.id).collect())
    }

    async fn fetch_details(&self, ids: &[u64]) -> Result<Vec<WorkItemDetail>> {
        let url = self.details_url(ids);
        tracing::debug!(%url, count = ids.len(), "fetching work item details");

        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .send()
            .await
            .map_err(|source| BacklogError::Http {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let text = Self::read_body(&url, resp).await?;
        if !status.is_success() {
            return Err(BacklogError::DetailRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: WorkItemsResponse =
            serde_json::from_str(&text).map_err(|source| BacklogError::Decode {
                what: "work items response",
                source,
            })?;
        Ok(parsed.value)
    }
}
