// Status page assembler - query every slot of every node, fail fast
use crate::application::metric_gateway::MetricGateway;
use crate::domain::error::SiteError;
use crate::domain::status::{LoadReading, NodeStatus, ServiceStatus, StatusReport};
use crate::infrastructure::config::{InfluxSettings, NodeConfig, ServiceConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct StatusService {
    gateway: Arc<dyn MetricGateway>,
    influx: InfluxSettings,
    nodes: Vec<NodeConfig>,
}

impl StatusService {
    pub fn new(
        gateway: Arc<dyn MetricGateway>,
        influx: InfluxSettings,
        nodes: Vec<NodeConfig>,
    ) -> Self {
        Self {
            gateway,
            influx,
            nodes,
        }
    }

    /// Any gateway-level failure aborts the whole page. A status page
    /// with some metrics silently missing is worse than an explicit error.
    pub async fn status_report(&self) -> Result<StatusReport, SiteError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            nodes.push(self.query_node(node).await?);
        }
        Ok(StatusReport::new(nodes))
    }

    async fn query_node(&self, node: &NodeConfig) -> Result<NodeStatus, SiteError> {
        let loads = self.query_loads(node).await?;

        let mut services = Vec::with_capacity(node.services.len() + 1);
        for service in &node.services {
            services.push(self.query_probe(service).await?);
        }
        if let Some(interface) = &node.upstream_interface {
            services.push(self.query_upstream(node, interface).await?);
        }

        Ok(NodeStatus {
            name: node.name.clone(),
            services,
            loads,
        })
    }

    /// The three load slots are a fixed-size set with no no-data default,
    /// so a missing row fails the page.
    async fn query_loads(&self, node: &NodeConfig) -> Result<Vec<LoadReading>, SiteError> {
        let command = format!(
            "SELECT last(load1), last(load5), last(load15) FROM system WHERE host = '{}' AND time > now() - 5m",
            node.host
        );
        let sets = self
            .gateway
            .query(&command, &self.influx.database, "s")
            .await?;
        let row = sets
            .first()
            .and_then(|set| set.rows.first())
            .ok_or_else(|| {
                SiteError::QueryFailed(format!("load query for {} returned no rows", node.name))
            })?;

        let mut loads = Vec::with_capacity(3);
        for column in 0..3 {
            let value = row.values.get(column).copied().flatten().ok_or_else(|| {
                SiteError::MalformedRow(format!(
                    "load column {column} missing for {}",
                    node.name
                ))
            })?;
            loads.push(LoadReading::new(value));
        }
        Ok(loads)
    }

    async fn query_probe(&self, service: &ServiceConfig) -> Result<ServiceStatus, SiteError> {
        let command = format!(
            "SELECT last(response_time), last(result_code) FROM http_response WHERE server = '{}' AND time > now() - 5m",
            service.server
        );
        let sets = self
            .gateway
            .query(&command, &self.influx.database, "s")
            .await?;
        let Some(row) = sets.first().and_then(|set| set.rows.first()) else {
            return Ok(ServiceStatus::no_data(&service.name));
        };

        // A partially-shaped probe row is a schema problem, not absent data.
        let response_time = row.values.first().copied().flatten().ok_or_else(|| {
            SiteError::MalformedRow(format!("response_time missing for probe {}", service.name))
        })?;
        let result_code = row.values.get(1).copied().flatten().ok_or_else(|| {
            SiteError::MalformedRow(format!("result_code missing for probe {}", service.name))
        })?;

        if result_code as i64 != 0 {
            Ok(ServiceStatus::offline(&service.name))
        } else {
            Ok(ServiceStatus::online(&service.name, response_time))
        }
    }

    async fn query_upstream(
        &self,
        node: &NodeConfig,
        interface: &str,
    ) -> Result<ServiceStatus, SiteError> {
        let command = format!(
            "SELECT non_negative_derivative(last(bytes_sent), 1s) FROM net WHERE host = '{}' AND interface = '{interface}' AND time > now() - 5m GROUP BY time(1m)",
            node.host
        );
        let sets = self
            .gateway
            .query(&command, &self.influx.database, "s")
            .await?;
        let rates: Vec<f64> = sets
            .iter()
            .flat_map(|set| set.rows.iter())
            .filter_map(|row| row.values.first().copied().flatten())
            .collect();

        if rates.is_empty() {
            return Ok(ServiceStatus::no_data("Upstream Load"));
        }
        let rate = rates.iter().sum::<f64>() / rates.len() as f64;
        // A dead exporter reports a flat zero rate, indistinguishable
        // from no data at all.
        if rate == 0.0 {
            return Ok(ServiceStatus::no_data("Upstream Load"));
        }

        let percentage = (rate / node.upstream_max_rate * 100.0).min(100.0) as i64;
        Ok(ServiceStatus::upstream("Upstream Load", percentage))
    }
}
