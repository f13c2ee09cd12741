// Gateway trait for time series queries
use crate::domain::error::SiteError;
use crate::domain::series::RowSet;
use async_trait::async_trait;

/// Port to the time series backend. One call issues one (possibly
/// multi-statement) query over a bounded time window; there is no
/// caching, retrying, or pooling behind it.
#[async_trait]
pub trait MetricGateway: Send + Sync {
    /// Run `command` against `database` and return the decoded result
    /// series. A reachable backend with a legitimately-empty metric is
    /// a success with empty row sets; an empty top-level result is a
    /// `QueryFailed` since it usually means a configuration bug.
    async fn query(
        &self,
        command: &str,
        database: &str,
        precision: &str,
    ) -> Result<Vec<RowSet>, SiteError>;
}
