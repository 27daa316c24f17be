use axum::extract::State;
use axum::Json;
use contracts::domain::a002_reception::dto::{Reception, ReceptionStats};

use crate::domain::a002_reception::service;
use crate::shared::error::{AppError, AppResult};
use crate::shared::state::AppState;

/// GET /api/tbreception/list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Reception>>> {
    let items = service::list(&state.db)
        .await
        .map_err(|e| AppError::internal("Failed to load receptions", e))?;
    Ok(Json(items))
}

/// GET /api/tbreception/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<ReceptionStats>> {
    let stats = service::stats(&state.db)
        .await
        .map_err(|e| AppError::internal("Failed to compute reception statistics", e))?;
    Ok(Json(stats))
}
