use axum::extract::State;
use axum::Json;
use contracts::shared::api::MessageResponse;
use contracts::system::roles::{AssignRoleRequest, CreateRoleRequest};

use crate::shared::error::AppResult;
use crate::shared::extract::{ApiJson, ApiPath};
use crate::shared::state::AppState;
use crate::system::roles::service;

/// POST /api/roles/create
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    service::create(state.identity.as_ref(), &request.role_name).await?;
    Ok(Json(MessageResponse::new(format!(
        "Role '{}' created",
        request.role_name.trim()
    ))))
}

/// GET /api/roles/list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(service::list(state.identity.as_ref()).await?))
}

/// POST /api/roles/assign
pub async fn assign(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AssignRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    service::assign(state.identity.as_ref(), &request.username, &request.role_name).await?;
    Ok(Json(MessageResponse::new(format!(
        "Role '{}' assigned to '{}'",
        request.role_name, request.username
    ))))
}

/// POST /api/roles/remove
pub async fn remove(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AssignRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    service::remove(state.identity.as_ref(), &request.username, &request.role_name).await?;
    Ok(Json(MessageResponse::new(format!(
        "Role '{}' removed from '{}'",
        request.role_name, request.username
    ))))
}

/// GET /api/roles/user/:username
pub async fn user_roles(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(service::roles_of_user(state.identity.as_ref(), &username).await?))
}
