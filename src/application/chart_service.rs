// Chart use cases - query, classify, produce a chart spec or a message
use crate::application::metric_gateway::MetricGateway;
use crate::domain::chart::ChartSpec;
use crate::domain::error::SiteError;
use crate::domain::series::{MetricRow, RowSet, Series};
use crate::domain::severity::Severity;
use crate::infrastructure::config::InfluxSettings;
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Either a renderable chart or the placeholder text for it.
pub enum ChartOutcome {
    Ready(ChartSpec),
    Insufficient { message: String },
}

#[derive(Clone)]
pub struct ChartService {
    gateway: Arc<dyn MetricGateway>,
    influx: InfluxSettings,
}

impl ChartService {
    pub fn new(gateway: Arc<dyn MetricGateway>, influx: InfluxSettings) -> Self {
        Self { gateway, influx }
    }

    /// Heart rate over the last 12 hours. Severity comes from the
    /// truncated average over the most recent hour, so a stale feed
    /// degrades to 0 and classifies as an error.
    pub async fn heart_rate_chart(
        &self,
        width: u32,
        height: u32,
    ) -> Result<ChartOutcome, SiteError> {
        let command = format!(
            "SELECT mean(value) FROM bpm WHERE host = '{}' AND time > now() - 12h GROUP BY time(5m)",
            self.influx.bpm_host
        );
        let sets = self
            .gateway
            .query(&command, &self.influx.body_database, "s")
            .await?;
        let series = collect_series(sets);

        if !series.is_chartable() {
            return Ok(ChartOutcome::Insufficient {
                message: "Not enough data collected in the last 12 hours to draw a graph."
                    .to_string(),
            });
        }

        let average = series.truncating_average_since(Utc::now() - Duration::hours(1));
        let severity = Severity::from_heart_rate(average);
        Ok(ChartOutcome::Ready(ChartSpec::new(
            width,
            height,
            "BPM".to_string(),
            series,
            severity,
        )?))
    }

    /// Short-term load of one host over the last hour.
    pub async fn load_chart(
        &self,
        host: &str,
        width: u32,
        height: u32,
    ) -> Result<ChartOutcome, SiteError> {
        let command = format!(
            "SELECT mean(load1) FROM system WHERE host = '{host}' AND time > now() - 1h GROUP BY time(1m)"
        );
        let sets = self
            .gateway
            .query(&command, &self.influx.database, "s")
            .await?;
        let series = collect_series(sets);

        if !series.is_chartable() {
            return Ok(ChartOutcome::Insufficient {
                message: "Not enough data collected in the last hour to draw a graph.".to_string(),
            });
        }

        let severity = Severity::from_load(series.truncating_average() as f64);
        Ok(ChartOutcome::Ready(ChartSpec::new(
            width,
            height,
            "load1".to_string(),
            series,
            severity,
        )?))
    }
}

fn collect_series(sets: Vec<RowSet>) -> Series {
    let rows: Vec<MetricRow> = sets.into_iter().flat_map(|set| set.rows).collect();
    Series::from_rows(&rows, 0)
}
