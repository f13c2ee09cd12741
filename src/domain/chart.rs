// Chart rendering input
use super::error::SiteError;
use super::series::Series;
use super::severity::Severity;

/// Everything the renderer needs. Dimensions are validated here so the
/// renderer never sees a degenerate drawing area.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub width: u32,
    pub height: u32,
    pub label: String,
    pub series: Series,
    pub severity: Severity,
}

impl ChartSpec {
    pub fn new(
        width: u32,
        height: u32,
        label: String,
        series: Series,
        severity: Severity,
    ) -> Result<Self, SiteError> {
        if width == 0 || height == 0 {
            return Err(SiteError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            label,
            series,
            severity,
        })
    }
}
