use axum::extract::State;
use axum::Json;
use contracts::domain::a005_decompt_prod::dto::{
    DecomptAdherentStat, DecomptGlobalStats, DecomptProd, DecomptProdListQuery,
    DecomptProdStatsQuery, DecomptStationStat, DecomptVarieteStat, ExportCategoriesStats,
    RendementStats,
};
use contracts::shared::api::ListResponse;

use crate::domain::a005_decompt_prod::service;
use crate::shared::error::{AppError, AppResult};
use crate::shared::extract::{ApiPath, ApiQuery};
use crate::shared::state::AppState;

/// GET /api/decomptprod
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecomptProdListQuery>,
) -> AppResult<Json<ListResponse<DecomptProd>>> {
    Ok(Json(service::list(&state.db, &query).await?))
}

/// GET /api/decomptprod/stats/global
pub async fn global(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecomptProdStatsQuery>,
) -> AppResult<Json<DecomptGlobalStats>> {
    Ok(Json(service::global(&state.db, &query).await?))
}

/// GET /api/decomptprod/stats/by-adherent
pub async fn by_adherent(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecomptProdStatsQuery>,
) -> AppResult<Json<Vec<DecomptAdherentStat>>> {
    Ok(Json(service::by_adherent(&state.db, &query).await?))
}

/// GET /api/decomptprod/stats/by-variete
pub async fn by_variete(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecomptProdStatsQuery>,
) -> AppResult<Json<Vec<DecomptVarieteStat>>> {
    Ok(Json(service::by_variete(&state.db, &query).await?))
}

/// GET /api/decomptprod/stats/by-station
pub async fn by_station(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecomptProdStatsQuery>,
) -> AppResult<Json<Vec<DecomptStationStat>>> {
    Ok(Json(service::by_station(&state.db, &query).await?))
}

/// GET /api/decomptprod/stats/rendement
pub async fn rendement(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecomptProdStatsQuery>,
) -> AppResult<Json<RendementStats>> {
    Ok(Json(service::rendement(&state.db, &query).await?))
}

/// GET /api/decomptprod/stats/export-categories
pub async fn export_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DecomptProdStatsQuery>,
) -> AppResult<Json<ExportCategoriesStats>> {
    Ok(Json(service::export_categories(&state.db, &query).await?))
}

/// GET /api/decomptprod/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> AppResult<Json<DecomptProd>> {
    service::get_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Record not found"))
}
