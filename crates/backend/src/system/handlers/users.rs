use axum::extract::State;
use axum::Json;
use contracts::shared::api::MessageResponse;
use contracts::system::auth::RegisterRequest;
use contracts::system::users::{
    UpdateUserRequest, UserCreatedResponse, UserProfile, UserRoleRequest, UserSummary,
};

use crate::shared::error::AppResult;
use crate::shared::extract::{ApiJson, ApiPath};
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/users/list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<UserSummary>>> {
    Ok(Json(service::list(state.identity.as_ref()).await?))
}

/// GET /api/users/profile
pub async fn profile(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(service::profile(state.identity.as_ref(), &claims.sub).await?))
}

/// POST /api/users/create
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> AppResult<Json<UserCreatedResponse>> {
    let user = service::create(state.identity.as_ref(), request, true).await?;
    Ok(Json(UserCreatedResponse {
        message: "User created".to_string(),
        user_id: user.id,
    }))
}

/// PUT /api/users/update/:id
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    service::update(state.identity.as_ref(), &id, request).await?;
    Ok(Json(MessageResponse::new("User updated")))
}

/// DELETE /api/users/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> AppResult<Json<MessageResponse>> {
    service::delete(state.identity.as_ref(), &id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

/// POST /api/users/assign-role
pub async fn assign_role(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    service::assign_role(state.identity.as_ref(), &request.user_id, &request.role_name).await?;
    Ok(Json(MessageResponse::new(format!(
        "Role '{}' assigned",
        request.role_name
    ))))
}

/// POST /api/users/remove-role
pub async fn remove_role(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    service::remove_role(state.identity.as_ref(), &request.user_id, &request.role_name).await?;
    Ok(Json(MessageResponse::new(format!(
        "Role '{}' removed",
        request.role_name
    ))))
}
