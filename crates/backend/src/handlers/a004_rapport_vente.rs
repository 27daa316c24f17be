use axum::extract::State;
use axum::Json;
use contracts::domain::a004_rapport_vente::dto::{
    AveragePriceStat, PriceTimelinePoint, RapportVente, RapportVenteListQuery,
    RapportVenteStatsQuery, VenteAcheteurStat, VenteGlobalStats, VenteStationStat,
    VenteTimelineBucket, VenteVarieteStat,
};
use contracts::shared::api::ListResponse;

use crate::domain::a004_rapport_vente::service;
use crate::shared::error::{AppError, AppResult};
use crate::shared::extract::{ApiPath, ApiQuery};
use crate::shared::state::AppState;

/// GET /api/rapportvente
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteListQuery>,
) -> AppResult<Json<ListResponse<RapportVente>>> {
    Ok(Json(service::list(&state.db, &query).await?))
}

/// GET /api/rapportvente/stats/global
pub async fn global(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteStatsQuery>,
) -> AppResult<Json<VenteGlobalStats>> {
    Ok(Json(service::global(&state.db, &query).await?))
}

/// GET /api/rapportvente/stats/timeline
pub async fn timeline(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteStatsQuery>,
) -> AppResult<Json<Vec<VenteTimelineBucket>>> {
    Ok(Json(service::timeline(&state.db, &query).await?))
}

/// GET /api/rapportvente/stats/by-station
pub async fn by_station(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteStatsQuery>,
) -> AppResult<Json<Vec<VenteStationStat>>> {
    Ok(Json(service::by_station(&state.db, &query).await?))
}

/// GET /api/rapportvente/stats/by-variete
pub async fn by_variete(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteStatsQuery>,
) -> AppResult<Json<Vec<VenteVarieteStat>>> {
    Ok(Json(service::by_variete(&state.db, &query).await?))
}

/// GET /api/rapportvente/stats/by-acheteur
pub async fn by_acheteur(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteStatsQuery>,
) -> AppResult<Json<Vec<VenteAcheteurStat>>> {
    Ok(Json(service::by_acheteur(&state.db, &query).await?))
}

/// GET /api/rapportvente/stats/average-price
pub async fn average_price(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteStatsQuery>,
) -> AppResult<Json<Vec<AveragePriceStat>>> {
    Ok(Json(service::average_price(&state.db, &query).await?))
}

/// GET /api/rapportvente/stats/price-timeline
pub async fn price_timeline(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RapportVenteStatsQuery>,
) -> AppResult<Json<Vec<PriceTimelinePoint>>> {
    Ok(Json(service::price_timeline(&state.db, &query).await?))
}

/// GET /api/rapportvente/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> AppResult<Json<RapportVente>> {
    service::get_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Sale not found"))
}
