// Severity classification against fixed thresholds

/// Ordered so that `max()` picks the worst value of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Load averages: < 4 ok, [4, 8) warning, >= 8 error.
    pub fn from_load(value: f64) -> Severity {
        if value >= 8.0 {
            Severity::Error
        } else if value >= 4.0 {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    /// Heart rate bands over a truncated average in bpm.
    /// [40, 100) ok, [30, 40) and [100, 130) warning, the rest error.
    pub fn from_heart_rate(average: i64) -> Severity {
        if (40..100).contains(&average) {
            Severity::Ok
        } else if (30..40).contains(&average) || (100..130).contains(&average) {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// Probe latency of a service that answered: < 0.2s ok, anything
    /// slower warning. Non-success result codes never get here.
    pub fn from_probe_latency(seconds: f64) -> Severity {
        if seconds >= 0.2 {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    /// Upstream bandwidth utilization as a truncated percentage of the
    /// configured maximum: <= 50 ok, (50, 90] warning, above error.
    pub fn from_utilization(percentage: i64) -> Severity {
        if percentage > 90 {
            Severity::Error
        } else if percentage > 50 {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}
