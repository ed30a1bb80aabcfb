use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::export::ExportFormat;
use super::session::{DashboardEvent, DashboardSession, NavTab, SessionError};
use super::view::DashboardView;

pub type SharedSession = Arc<Mutex<DashboardSession>>;

#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    pub low: u8,
    pub high: u8,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentRequest {
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ManagerRequest {
    #[serde(default)]
    pub row: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: NavTab,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Serialize)]
pub struct TabResponse {
    pub active_tab: NavTab,
    pub active_tab_label: &'static str,
    pub view: DashboardView,
}

/// Router builder exposing the dashboard view, its interactions and the export.
pub fn dashboard_router(session: SharedSession) -> Router {
    Router::new()
        .route("/api/v1/dashboard", get(view_handler))
        .route("/api/v1/dashboard/range", post(range_handler))
        .route("/api/v1/dashboard/department", post(department_handler))
        .route("/api/v1/dashboard/manager", post(manager_handler))
        .route("/api/v1/dashboard/tab", post(tab_handler))
        .route("/api/v1/dashboard/export", get(export_handler))
        .with_state(session)
}

pub(crate) async fn view_handler(State(session): State<SharedSession>) -> Response {
    match lock(&session) {
        Ok(guard) => (StatusCode::OK, Json(guard.view().clone())).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn range_handler(
    State(session): State<SharedSession>,
    Json(request): Json<RangeRequest>,
) -> Response {
    dispatch(
        &session,
        DashboardEvent::RangeChanged {
            low: request.low,
            high: request.high,
        },
    )
}

pub(crate) async fn department_handler(
    State(session): State<SharedSession>,
    Json(request): Json<DepartmentRequest>,
) -> Response {
    let event = match request.department {
        Some(name) => DashboardEvent::DepartmentClicked { name },
        None => DashboardEvent::DepartmentCleared,
    };
    dispatch(&session, event)
}

pub(crate) async fn manager_handler(
    State(session): State<SharedSession>,
    Json(request): Json<ManagerRequest>,
) -> Response {
    let event = match request.row {
        Some(index) => DashboardEvent::ManagerRowClicked { index },
        None => DashboardEvent::ManagerCleared,
    };
    dispatch(&session, event)
}

pub(crate) async fn tab_handler(
    State(session): State<SharedSession>,
    Json(request): Json<TabRequest>,
) -> Response {
    let mut guard = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    match guard.handle(DashboardEvent::NavTabSelected { tab: request.tab }) {
        Ok(outcome) => {
            let body = TabResponse {
                active_tab: guard.active_tab(),
                active_tab_label: guard.active_tab().label(),
                view: outcome.view,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn export_handler(
    State(session): State<SharedSession>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let format = query.format.unwrap_or_default();
    let mut guard = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    match guard.handle(DashboardEvent::ExportRequested { format }) {
        Ok(outcome) => match outcome.export {
            Some(artifact) => {
                let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
                (
                    StatusCode::OK,
                    [
                        (header::CONTENT_TYPE, artifact.content_type.to_string()),
                        (header::CONTENT_DISPOSITION, disposition),
                    ],
                    artifact.bytes,
                )
                    .into_response()
            }
            None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "export unavailable"),
        },
        Err(err) => session_error_response(err),
    }
}

fn dispatch(session: &SharedSession, event: DashboardEvent) -> Response {
    let mut guard = match lock(session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    match guard.handle(event) {
        Ok(outcome) => (StatusCode::OK, Json(outcome.view)).into_response(),
        Err(err) => session_error_response(err),
    }
}

fn lock(session: &SharedSession) -> Result<MutexGuard<'_, DashboardSession>, Response> {
    session.lock().map_err(|_| {
        error!("dashboard session mutex poisoned");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "dashboard session unavailable")
    })
}

fn session_error_response(err: SessionError) -> Response {
    match err {
        SessionError::Filter(error) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &error.to_string())
        }
        SessionError::Export(error) => {
            error!(%error, "export failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let payload = json!({ "error": message });
    (status, Json(payload)).into_response()
}
