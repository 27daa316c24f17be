use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Декомпт производства по адеренту и сорту (decompt_prod)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomptProd {
    pub id: String,
    pub refver: i32,
    pub nomadh: Option<String>,
    pub codvar: i32,
    pub nomvar: Option<String>,
    pub pd_reception: f64,
    pub pdcond: f64,
    #[serde(rename = "expCatI")]
    pub exp_cat_i: f64,
    #[serde(rename = "expCatII")]
    pub exp_cat_ii: f64,
    pub pd_ecart: f64,
    pub freinte: f64,
    pub stations: Option<String>,
    pub date_creation: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecomptProdListQuery {
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub station: Option<String>,
    /// Точный код сорта
    pub codvar: Option<String>,
    pub nomadh: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecomptProdStatsQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub codvar: Option<String>,
    pub station: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomptGlobalStats {
    pub total_enregistrements: usize,
    pub poids_reception_total: f64,
    pub poids_cond_total: f64,
    #[serde(rename = "exportCatITotal")]
    pub export_cat_i_total: f64,
    #[serde(rename = "exportCatIITotal")]
    pub export_cat_ii_total: f64,
    pub poids_ecart_total: f64,
    pub freinte_total: f64,
    pub nombre_adherents: usize,
    pub nombre_varietes: usize,
    pub nombre_stations: usize,
    pub taux_rendement: f64,
    pub taux_freinte: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomptAdherentStat {
    pub refver: i32,
    pub nomadh: String,
    pub total_enregistrements: usize,
    pub poids_reception: f64,
    pub poids_cond: f64,
    #[serde(rename = "exportCatI")]
    pub export_cat_i: f64,
    #[serde(rename = "exportCatII")]
    pub export_cat_ii: f64,
    pub poids_ecart: f64,
    pub freinte: f64,
    pub taux_rendement: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomptVarieteStat {
    pub codvar: i32,
    pub nomvar: String,
    pub total_enregistrements: usize,
    pub poids_reception: f64,
    pub poids_cond: f64,
    #[serde(rename = "exportCatI")]
    pub export_cat_i: f64,
    #[serde(rename = "exportCatII")]
    pub export_cat_ii: f64,
    pub poids_ecart: f64,
    pub freinte: f64,
    pub taux_rendement: f64,
    #[serde(rename = "tauxExportCatI")]
    pub taux_export_cat_i: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomptStationStat {
    pub station: String,
    pub total_enregistrements: usize,
    pub poids_reception: f64,
    pub poids_cond: f64,
    #[serde(rename = "exportCatI")]
    pub export_cat_i: f64,
    #[serde(rename = "exportCatII")]
    pub export_cat_ii: f64,
    pub poids_ecart: f64,
    pub freinte: f64,
    pub nombre_adherents: usize,
    pub taux_rendement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendementStats {
    pub taux_rendement_global: f64,
    pub taux_freinte_global: f64,
    pub taux_ecart_global: f64,
    #[serde(rename = "tauxExportCatI")]
    pub taux_export_cat_i: f64,
    #[serde(rename = "tauxExportCatII")]
    pub taux_export_cat_ii: f64,
    pub poids_reception_total: f64,
    pub poids_cond_total: f64,
    pub freinte_total: f64,
    pub ecart_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCategoriesStats {
    pub categories: Vec<CategoryValue>,
    pub total: f64,
}
