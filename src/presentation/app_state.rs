// Application state for HTTP handlers
use crate::application::chart_service::ChartService;
use crate::application::status_service::StatusService;
use crate::infrastructure::config::SiteConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: SiteConfig,
    pub chart_service: ChartService,
    pub status_service: StatusService,
}
