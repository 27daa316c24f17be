use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Экспортное досье (dossier_export)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierExport {
    pub id: String,
    pub numdos: String,
    pub numtc: Option<String>,
    pub navire: Option<String>,
    pub dtedep: Option<NaiveDateTime>,
    pub codpay: Option<String>,
    pub nompay: Option<String>,
    pub coddes: Option<String>,
    pub rsclient: Option<String>,
    pub transite: Option<String>,
    pub transpor: Option<String>,
    pub refexp: Option<String>,
    pub exporter: Option<String>,
    pub codvar: Option<String>,
    pub produit: Option<String>,
    pub nbrpal: Option<f64>,
    pub nbrcol: Option<f64>,
    pub pdscom: Option<f64>,
    pub typtrp: Option<String>,
    pub stations: Option<String>,
    pub date_creation: NaiveDateTime,
}

/// Запрос `GET /api/dossierexport/list`. Значения остаются строками;
/// разбор и проверка в конвейере запросов.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DossierExportListQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub navire: Option<String>,
    pub codpay: Option<String>,
    pub station: Option<String>,
    pub rsclient: Option<String>,
    pub codvar: Option<String>,
    pub refexp: Option<String>,
    pub exporter: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Общий запрос статистики. `station` сужает только общую
/// статистику, `period` только таймлайн, `limit` только рейтинги.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DossierExportStatsQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub station: Option<String>,
    pub period: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierExportStats {
    pub total_dossiers: usize,
    pub total_palettes: f64,
    pub total_colis: f64,
    pub total_poids: f64,
    pub navire_count: usize,
    pub pays_count: usize,
    pub clients_count: usize,
    pub last_export_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierTimelineBucket {
    pub period: String,
    pub total_dossiers: usize,
    pub total_palettes: f64,
    pub total_colis: f64,
    pub total_poids: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierCountryStat {
    pub codpay: String,
    pub nompay: Option<String>,
    pub total_dossiers: usize,
    pub total_palettes: f64,
    pub total_colis: f64,
    pub total_poids: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierProductStat {
    pub codvar: String,
    pub produit: Option<String>,
    pub total_dossiers: usize,
    pub total_palettes: f64,
    pub total_colis: f64,
    pub total_poids: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierNavireStat {
    pub navire: String,
    pub total_dossiers: usize,
    pub total_palettes: f64,
    pub total_poids: f64,
    pub last_departure: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierStationStat {
    pub station: String,
    pub total_dossiers: usize,
    pub total_palettes: f64,
    pub total_colis: f64,
    pub total_poids: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierClientStat {
    pub client: String,
    pub rsclient: String,
    pub total_dossiers: usize,
    pub total_palettes: f64,
    pub total_colis: f64,
    pub total_poids: f64,
}
