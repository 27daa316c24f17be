use axum::extract::State;
use axum::Json;
use contracts::domain::a003_dossier_export::dto::{
    DossierClientStat, DossierCountryStat, DossierExport, DossierExportListQuery,
    DossierExportStats, DossierExportStatsQuery, DossierNavireStat, DossierProductStat,
    DossierStationStat, DossierTimelineBucket,
};
use contracts::shared::api::ListResponse;

use crate::domain::a003_dossier_export::service;
use crate::shared::error::{AppError, AppResult};
use crate::shared::extract::{ApiPath, ApiQuery};
use crate::shared::state::AppState;

/// GET /api/dossierexport/list
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportListQuery>,
) -> AppResult<Json<ListResponse<DossierExport>>> {
    Ok(Json(service::list(&state.db, &query).await?))
}

/// GET /api/dossierexport/stats
pub async fn stats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportStatsQuery>,
) -> AppResult<Json<DossierExportStats>> {
    Ok(Json(service::stats(&state.db, &query).await?))
}

/// GET /api/dossierexport/stats/timeline
pub async fn timeline(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportStatsQuery>,
) -> AppResult<Json<Vec<DossierTimelineBucket>>> {
    Ok(Json(service::timeline(&state.db, &query).await?))
}

/// GET /api/dossierexport/stats/by-country
pub async fn by_country(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportStatsQuery>,
) -> AppResult<Json<Vec<DossierCountryStat>>> {
    Ok(Json(service::by_country(&state.db, &query).await?))
}

/// GET /api/dossierexport/stats/by-product
pub async fn by_product(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportStatsQuery>,
) -> AppResult<Json<Vec<DossierProductStat>>> {
    Ok(Json(service::by_product(&state.db, &query).await?))
}

/// GET /api/dossierexport/stats/by-navire
pub async fn by_navire(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportStatsQuery>,
) -> AppResult<Json<Vec<DossierNavireStat>>> {
    Ok(Json(service::by_navire(&state.db, &query).await?))
}

/// GET /api/dossierexport/stats/by-station
pub async fn by_station(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportStatsQuery>,
) -> AppResult<Json<Vec<DossierStationStat>>> {
    Ok(Json(service::by_station(&state.db, &query).await?))
}

/// GET /api/dossierexport/stats/by-client
pub async fn by_client(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DossierExportStatsQuery>,
) -> AppResult<Json<Vec<DossierClientStat>>> {
    Ok(Json(service::by_client(&state.db, &query).await?))
}

/// GET /api/dossierexport/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> AppResult<Json<DossierExport>> {
    service::get_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Dossier not found"))
}
