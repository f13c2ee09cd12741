// Application layer - use cases orchestrating the gateway and domain rules
pub mod chart_service;
pub mod metric_gateway;
pub mod status_service;
