// Time series domain models
use chrono::{DateTime, Utc};

/// One measurement as returned by the backend. The value may be
/// structurally present but semantically absent.
#[derive(Debug, Clone)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

/// One decoded backend row. The number of value columns is defined by
/// the query, not inferred; the timestamp column is not part of `values`.
#[derive(Debug, Clone)]
pub struct MetricRow {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<Option<f64>>,
}

/// One named result series of a query.
#[derive(Debug, Clone)]
pub struct RowSet {
    pub name: String,
    pub rows: Vec<MetricRow>,
}

/// Chronological (timestamp, value) pairs with absent values filtered out.
#[derive(Debug, Clone, Default)]
pub struct Series {
    points: Vec<(DateTime<Utc>, f64)>,
}

impl Series {
    pub fn from_samples(samples: impl IntoIterator<Item = MetricSample>) -> Self {
        let mut points: Vec<(DateTime<Utc>, f64)> = samples
            .into_iter()
            .filter_map(|sample| sample.value.map(|value| (sample.timestamp, value)))
            .collect();
        points.sort_by_key(|(timestamp, _)| *timestamp);
        Self { points }
    }

    /// Build a series from one value column of a set of rows. Rows where
    /// that column is absent are skipped, not zeroed.
    pub fn from_rows(rows: &[MetricRow], column: usize) -> Self {
        Self::from_samples(rows.iter().map(|row| MetricSample {
            timestamp: row.timestamp,
            value: row.values.get(column).copied().flatten(),
        }))
    }

    pub fn points(&self) -> &[(DateTime<Utc>, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than two points route to the placeholder, never a chart.
    pub fn is_chartable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|(_, value)| *value).fold(0.0, f64::max)
    }

    /// Average by summing truncated integer values and integer-dividing
    /// by the count. The thresholds are defined against this accumulation,
    /// a plain float average would shift classification boundaries.
    pub fn truncating_average(&self) -> i64 {
        Self::truncate_and_average(self.points.iter().map(|(_, value)| *value))
    }

    /// Same accumulation restricted to points at or after `cutoff`.
    /// An empty window yields 0.
    pub fn truncating_average_since(&self, cutoff: DateTime<Utc>) -> i64 {
        Self::truncate_and_average(
            self.points
                .iter()
                .filter(|(timestamp, _)| *timestamp >= cutoff)
                .map(|(_, value)| *value),
        )
    }

    fn truncate_and_average(values: impl Iterator<Item = f64>) -> i64 {
        let mut sum = 0i64;
        let mut count = 0i64;
        for value in values {
            sum += value as i64;
            count += 1;
        }
        if count == 0 { 0 } else { sum / count }
    }
}
