// InfluxQL-over-HTTP gateway implementation
use crate::application::metric_gateway::MetricGateway;
use crate::domain::error::SiteError;
use crate::domain::series::{MetricRow, RowSet};
use crate::infrastructure::config::InfluxSettings;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct InfluxGateway {
    address: String,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQlResponse {
    #[serde(default)]
    results: Vec<InfluxQlResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQlResult {
    #[serde(default)]
    series: Option<Vec<InfluxQlSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQlSeries {
    name: String,
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl InfluxGateway {
    pub fn new(influx: &InfluxSettings) -> Self {
        Self {
            address: influx.address.trim_end_matches('/').to_string(),
            username: influx.username.clone(),
            password: influx.password.clone(),
        }
    }

    fn build_query_url(&self, command: &str, database: &str, precision: &str) -> String {
        format!(
            "{}/query?db={}&epoch={}&q={}",
            self.address,
            database,
            precision,
            urlencoding::encode(command)
        )
    }

    /// Epoch-seconds row decode. A null timestamp skips the row, a null
    /// value cell stays absent, anything non-numeric is a malformed row.
    fn decode_row(cells: &[serde_json::Value]) -> Result<Option<MetricRow>, SiteError> {
        let Some(time_cell) = cells.first() else {
            return Ok(None);
        };
        if time_cell.is_null() {
            return Ok(None);
        }
        let epoch = time_cell
            .as_f64()
            .ok_or_else(|| SiteError::MalformedRow(format!("non-numeric timestamp: {time_cell}")))?;
        let timestamp = Utc
            .timestamp_opt(epoch as i64, 0)
            .single()
            .ok_or_else(|| SiteError::MalformedRow(format!("timestamp out of range: {epoch}")))?;

        let mut values = Vec::with_capacity(cells.len() - 1);
        for cell in &cells[1..] {
            if cell.is_null() {
                values.push(None);
            } else {
                let value = cell.as_f64().ok_or_else(|| {
                    SiteError::MalformedRow(format!("non-numeric value cell: {cell}"))
                })?;
                values.push(Some(value));
            }
        }
        Ok(Some(MetricRow { timestamp, values }))
    }
}

#[async_trait]
impl MetricGateway for InfluxGateway {
    async fn query(
        &self,
        command: &str,
        database: &str,
        precision: &str,
    ) -> Result<Vec<RowSet>, SiteError> {
        let url = self.build_query_url(command, database, precision);

        // One independent client per call, bounded by the query timeout.
        let client = reqwest::Client::builder()
            .timeout(QUERY_TIMEOUT)
            .build()
            .map_err(|e| SiteError::Unavailable(e.to_string()))?;

        let mut request = client.get(&url).header("Accept", "application/json");
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request
            .send()
            .await
            .map_err(|e| SiteError::Unavailable(format!("influx request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // Credentials are an infrastructure problem, same as unreachable.
            return Err(SiteError::Unavailable(format!(
                "influx rejected credentials ({status})"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiteError::QueryFailed(format!(
                "influx returned {status}: {body}"
            )));
        }

        let data = response
            .json::<InfluxQlResponse>()
            .await
            .map_err(|e| SiteError::QueryFailed(format!("undecodable influx response: {e}")))?;

        if data.results.is_empty() {
            return Err(SiteError::QueryFailed(
                "influx returned an empty result".to_string(),
            ));
        }

        let mut sets = Vec::new();
        for result in data.results {
            if let Some(error) = result.error {
                return Err(SiteError::QueryFailed(error));
            }
            for series in result.series.unwrap_or_default() {
                let mut rows = Vec::with_capacity(series.values.len());
                for cells in &series.values {
                    if let Some(row) = Self::decode_row(cells)? {
                        rows.push(row);
                    }
                }
                sets.push(RowSet {
                    name: series.name,
                    rows,
                });
            }
        }
        Ok(sets)
    }
}
