// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::telemetry_service::TelemetryService;
use crate::domain::channel::ChannelRef;

#[derive(Clone)]
pub struct AppState {
    pub telemetry_service: TelemetryService,
    pub dashboard_service: DashboardService,
    pub channel: ChannelRef,
    pub default_results: u32,
}
