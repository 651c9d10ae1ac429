use std::io::Write;

use crate::config::BacklogConfig;
use crate::error::{BacklogError, Result};
use crate::model::work_item::WorkItemDetail;
use crate::providers::Provider;
use crate::ui::table::render_table;
use crate::util::wiql;

/// Upper bound on ids sent to the details endpoint in one request.
pub const MAX_DETAIL_IDS: usize = 200;

/// How a run ended, short of an unexpected failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The table was rendered with these rows.
    Listed(Vec<WorkItemDetail>),
    /// The query succeeded but matched nothing.
    NoOpenItems,
    /// The query endpoint rejected the request.
    QueryFailed { status: u16, body: String },
}

/// Result of the WIQL phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Ids(Vec<u64>),
    Rejected { status: u16, body: String },
}

pub struct BacklogReporter<'a> {
    config: &'a BacklogConfig,
    provider: &'a dyn Provider,
}

impl<'a> BacklogReporter<'a> {
    pub fn new(config: &'a BacklogConfig, provider: &'a dyn Provider) -> Self {
        Self { config, provider }
    }

    /// Ids of every open item in priority order. A rejected query is an
    /// outcome rather than an error so the caller can end the run quietly.
    pub async fn query_open_items(&self) -> Result<QueryOutcome> {
        let query = wiql::open_items_query(self.config.project());
        match self.provider.query_ids(&query).await {
            Ok(ids) => Ok(QueryOutcome::Ids(ids)),
            Err(BacklogError::QueryRejected { status, body }) => {
                Ok(QueryOutcome::Rejected { status, body })
            }
            Err(e) => Err(e),
        }
    }

    /// Details for the first `MAX_DETAIL_IDS` ids; the rest are dropped.
    pub async fn fetch_details(&self, ids: &[u64]) -> Result<Vec<WorkItemDetail>> {
        let ids = &ids[..ids.len().min(MAX_DETAIL_IDS)];
        self.provider.fetch_details(ids).await
    }

    pub async fn run(&self, out: &mut dyn Write) -> Result<Outcome> {
        writeln!(out, "🔍 Connecting to '{}'...", self.config.project())?;
        tracing::info!(
            provider = self.provider.name(),
            project = self.config.project(),
            "querying backlog"
        );

        let ids = match self.query_open_items().await? {
            QueryOutcome::Ids(ids) => ids,
            QueryOutcome::Rejected { status, body } => {
                writeln!(out, "❌ API Error ({status}): {body}")?;
                return Ok(Outcome::QueryFailed { status, body });
            }
        };

        if ids.is_empty() {
            writeln!(out, "⚠️  No open items found in backlog.")?;
            return Ok(Outcome::NoOpenItems);
        }

        writeln!(out, "✅ Found {} items. Fetching details...", ids.len())?;
        if ids.len() > MAX_DETAIL_IDS {
            tracing::warn!(
                found = ids.len(),
                shown = MAX_DETAIL_IDS,
                "backlog exceeds detail limit, extra items dropped"
            );
        }

        let items = self.fetch_details(&ids).await?;
        render_table(out, &items)?;
        Ok(Outcome::Listed(items))
    }
}
