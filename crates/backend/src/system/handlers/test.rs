//! Probe endpoints for checking a token against each access level

use axum::Json;
use contracts::shared::api::MessageResponse;

use crate::system::auth::extractor::CurrentUser;

/// GET /api/test/public
pub async fn public() -> Json<MessageResponse> {
    Json(MessageResponse::new("Public endpoint, no authentication required"))
}

/// GET /api/test/authenticated
pub async fn authenticated(CurrentUser(claims): CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("Hello {}, you are authenticated", claims.sub)))
}

/// GET /api/test/admin-only
pub async fn admin_only(CurrentUser(claims): CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("Hello {}, you have the Admin role", claims.sub)))
}

/// GET /api/test/manager-only
pub async fn manager_only(CurrentUser(claims): CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("Hello {}, you have the Manager role", claims.sub)))
}

/// GET /api/test/admin-or-manager
pub async fn admin_or_manager(CurrentUser(claims): CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "Hello {}, you have the Admin or Manager role",
        claims.sub
    )))
}
