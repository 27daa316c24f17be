use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

use super::{ROLE_ADMIN, ROLE_MANAGER, ROLE_SUPER_USER};
use crate::shared::error::AppError;
use crate::shared::state::AppState;

/// Validates the bearer token and returns its claims
fn authenticate(state: &AppState, req: &Request) -> Result<TokenClaims, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    state.tokens.validate(token).map_err(|e| {
        tracing::debug!("Rejected token: {:#}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

async fn authorize(state: AppState, mut req: Request, next: Next, roles: &[&str]) -> Result<Response, AppError> {
    let claims = authenticate(&state, &req)?;

    if !roles.is_empty() && !claims.has_any_role(roles) {
        return Err(AppError::Forbidden(format!(
            "Access denied: requires role {}",
            roles.join(" or ")
        )));
    }

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, AppError> {
    authorize(state, req, next, &[]).await
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, AppError> {
    authorize(state, req, next, &[ROLE_ADMIN]).await
}

/// Business data endpoints
pub async fn require_super_user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(state, req, next, &[ROLE_SUPER_USER]).await
}

pub async fn require_manager(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, AppError> {
    authorize(state, req, next, &[ROLE_MANAGER]).await
}

pub async fn require_admin_or_manager(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(state, req, next, &[ROLE_ADMIN, ROLE_MANAGER]).await
}
