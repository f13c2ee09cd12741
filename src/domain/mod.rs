// Domain layer - metric values, classification rules and the error taxonomy
pub mod chart;
pub mod error;
pub mod series;
pub mod severity;
pub mod status;
