// Status page domain models
use super::severity::Severity;
use chrono::{DateTime, Utc};

/// Reachability and latency of one named upstream service.
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub name: String,
    pub severity: Severity,
    pub message: String,
}

impl ServiceStatus {
    pub fn no_data(name: &str) -> Self {
        Self {
            name: name.to_string(),
            severity: Severity::Error,
            message: "No data!".to_string(),
        }
    }

    pub fn offline(name: &str) -> Self {
        Self {
            name: name.to_string(),
            severity: Severity::Error,
            message: "Offline.".to_string(),
        }
    }

    pub fn online(name: &str, latency: f64) -> Self {
        Self {
            name: name.to_string(),
            severity: Severity::from_probe_latency(latency),
            message: format!("Online. {latency:.2}s latency."),
        }
    }

    pub fn upstream(name: &str, percentage: i64) -> Self {
        Self {
            name: name.to_string(),
            severity: Severity::from_utilization(percentage),
            message: format!("{percentage}% average utilisation over the last 5 minutes"),
        }
    }
}

/// One load average figure of a host.
#[derive(Debug, Clone)]
pub struct LoadReading {
    pub value: f64,
    pub severity: Severity,
}

impl LoadReading {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            severity: Severity::from_load(value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodeStatus {
    pub name: String,
    pub services: Vec<ServiceStatus>,
    pub loads: Vec<LoadReading>,
}

/// The bundle handed to the status page template.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub nodes: Vec<NodeStatus>,
    pub overall: Severity,
    pub generated_at: DateTime<Utc>,
}

impl StatusReport {
    pub fn new(nodes: Vec<NodeStatus>) -> Self {
        let overall = nodes
            .iter()
            .flat_map(|node| {
                node.services
                    .iter()
                    .map(|service| service.severity)
                    .chain(node.loads.iter().map(|load| load.severity))
            })
            .max()
            .unwrap_or(Severity::Ok);
        Self {
            nodes,
            overall,
            generated_at: Utc::now(),
        }
    }
}
