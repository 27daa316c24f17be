use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_stock::dto::{
    Stock, StockFilterQuery, StockInput, StockStats, SyncRequest, SyncResponse,
};
use contracts::shared::api::MessageResponse;

use crate::domain::a001_stock::{service, sync};
use crate::shared::error::{AppError, AppResult};
use crate::shared::extract::{ApiJson, ApiPath, ApiQuery};
use crate::shared::state::AppState;

/// GET /api/stock/list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Stock>>> {
    let items = service::list(&state.db)
        .await
        .map_err(|e| AppError::internal("Failed to load stock", e))?;
    Ok(Json(items))
}

/// GET /api/stock/filter
pub async fn filter(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StockFilterQuery>,
) -> AppResult<Json<Vec<Stock>>> {
    let items = service::filter(&state.db, &query)
        .await
        .map_err(|e| AppError::internal("Failed to filter stock", e))?;
    Ok(Json(items))
}

/// GET /api/stock/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<StockStats>> {
    let stats = service::stats(&state.db)
        .await
        .map_err(|e| AppError::internal("Failed to compute stock statistics", e))?;
    Ok(Json(stats))
}

/// GET /api/stock/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Stock>> {
    service::get_by_id(&state.db, id)
        .await
        .map_err(|e| AppError::internal("Failed to load stock item", e))?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Stock item not found"))
}

/// POST /api/stock/create
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<StockInput>,
) -> AppResult<(StatusCode, Json<Stock>)> {
    let created = service::create(&state.db, &input)
        .await
        .map_err(|e| AppError::internal("Failed to create stock item", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/stock/update/:id
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<StockInput>,
) -> AppResult<Json<MessageResponse>> {
    let found = service::update(&state.db, id, &input)
        .await
        .map_err(|e| AppError::internal("Failed to update stock item", e))?;
    if !found {
        return Err(AppError::not_found("Stock item not found"));
    }
    Ok(Json(MessageResponse::new("Stock item updated")))
}

/// DELETE /api/stock/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    let found = service::delete(&state.db, id)
        .await
        .map_err(|e| AppError::internal("Failed to delete stock item", e))?;
    if !found {
        return Err(AppError::not_found("Stock item not found"));
    }
    Ok(Json(MessageResponse::new("Stock item deleted")))
}

/// POST /api/stock/sync
pub async fn sync(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SyncRequest>,
) -> AppResult<Json<SyncResponse>> {
    let api_url = request.api_url.trim();
    if api_url.is_empty() {
        return Err(AppError::bad_request("apiUrl is required"));
    }
    Ok(Json(sync::sync_from_api(&state.db, &state.http, api_url).await?))
}
