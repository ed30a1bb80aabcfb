use metrics_exporter_prometheus::PrometheusHandle;
use org_dashboard::dashboard::{DashboardSession, Dataset, ScoreBounds, SharedSession};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The service hosts one dashboard session shared by every request.
pub(crate) fn shared_session(dataset: Dataset, bounds: ScoreBounds) -> SharedSession {
    Arc::new(Mutex::new(DashboardSession::new(dataset, bounds)))
}
