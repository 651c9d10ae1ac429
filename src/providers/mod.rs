pub mod azure_devops;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::work_item::WorkItemDetail;

/// The two calls the backlog report makes against the tracking service.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Run a WIQL query and return the matching ids in service order.
    /// A non-success status is reported as `BacklogError::QueryRejected`.
    async fn query_ids(&self, wiql: &str) -> Result<Vec<u64>>;

    /// Fetch title, priority and state for `ids` in a single request.
    async fn fetch_details(&self, ids: &[u64]) -> Result<Vec<WorkItemDetail>>;
}
