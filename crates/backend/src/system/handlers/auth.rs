use axum::extract::State;
use axum::Json;
use contracts::shared::api::MessageResponse;
use contracts::system::auth::{AuthResponse, LoginRequest, RegisterRequest};

use crate::shared::error::{AppError, AppResult};
use crate::shared::extract::ApiJson;
use crate::shared::state::AppState;
use crate::system::users::service as user_service;

/// POST /api/auth/register
///
/// The account stays disabled until an administrator confirms it.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    user_service::create(state.identity.as_ref(), request, false).await?;
    Ok(Json(MessageResponse::new(
        "Registration successful. Your account must be activated by an administrator.",
    )))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user =
        user_service::verify_credentials(state.identity.as_ref(), &request.username, &request.password).await?;
    let roles = state.identity.roles_of(&user.id).await?;

    let token = state
        .tokens
        .issue(&user, &roles)
        .map_err(|e| AppError::internal("Failed to issue token", e))?;

    tracing::info!("User '{}' signed in", user.username);
    Ok(Json(AuthResponse {
        token,
        username: user.username,
        email: user.email,
        roles,
    }))
}
