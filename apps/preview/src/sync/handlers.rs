use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::form::document::{ControlRef, FormSnapshot};
use crate::form::GroupId;
use crate::sync::projector::{PreviewSnapshot, PreviewTarget};
use crate::sync::{HostEvent, SyncReport};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Synchronization passes run so far.
    pub passes: u64,
    #[serde(flatten)]
    pub preview: PreviewSnapshot,
}

/// Response of the add routes: the appended group's id next to the pass it triggered.
#[derive(Debug, Serialize)]
pub struct AddGroupResponse {
    /// `None` when the host has no container for this kind.
    pub group_id: Option<GroupId>,
    pub report: SyncReport,
}

impl From<SyncReport> for AddGroupResponse {
    fn from(mut report: SyncReport) -> Self {
        AddGroupResponse {
            group_id: report.group_id.take(),
            report,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ValueChangedRequest {
    pub control: ControlRef,
    pub value: String,
}

async fn dispatch(state: &AppState, event: HostEvent) -> Result<SyncReport, AppError> {
    // The lock spans mutation and pass, so passes never interleave.
    let mut builder = state.builder.lock().await;
    Ok(builder.handle(event)?)
}

/// GET /api/v1/form
pub async fn handle_get_form(State(state): State<AppState>) -> Json<FormSnapshot> {
    let builder = state.builder.lock().await;
    Json(builder.form().snapshot())
}

/// POST /api/v1/form/education
pub async fn handle_add_education(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AddGroupResponse>), AppError> {
    let report = dispatch(&state, HostEvent::AddEducation).await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

/// POST /api/v1/form/work
pub async fn handle_add_work(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AddGroupResponse>), AppError> {
    let report = dispatch(&state, HostEvent::AddWork).await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

/// POST /api/v1/form/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AddGroupResponse>), AppError> {
    let report = dispatch(&state, HostEvent::AddSkill).await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

/// PATCH /api/v1/form/controls
pub async fn handle_value_changed(
    State(state): State<AppState>,
    Json(req): Json<ValueChangedRequest>,
) -> Result<Json<SyncReport>, AppError> {
    let event = HostEvent::ValueChanged {
        control: req.control,
        value: req.value,
    };
    Ok(Json(dispatch(&state, event).await?))
}

/// POST /api/v1/form/submit
pub async fn handle_submit(State(state): State<AppState>) -> Result<Json<SyncReport>, AppError> {
    Ok(Json(dispatch(&state, HostEvent::Submitted).await?))
}

/// POST /api/v1/events
pub async fn handle_event(
    State(state): State<AppState>,
    Json(event): Json<HostEvent>,
) -> Result<Json<SyncReport>, AppError> {
    Ok(Json(dispatch(&state, event).await?))
}

/// GET /api/v1/preview
pub async fn handle_get_preview(State(state): State<AppState>) -> Json<PreviewResponse> {
    let builder = state.builder.lock().await;
    Json(PreviewResponse {
        passes: builder.passes(),
        preview: builder.preview().snapshot(),
    })
}

/// DELETE /api/v1/preview/targets/:target
pub async fn handle_detach_target(
    State(state): State<AppState>,
    Path(target_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let target = PreviewTarget::from_id(&target_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown preview target '{target_id}'")))?;

    let mut builder = state.builder.lock().await;
    if !builder.detach_target(target) {
        return Err(AppError::NotFound(format!(
            "Preview target '{target_id}' is not attached"
        )));
    }
    info!(preview_target = %target_id, "Host detached preview target");
    Ok(StatusCode::NO_CONTENT)
}
