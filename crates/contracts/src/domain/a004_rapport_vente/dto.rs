use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Строка отчёта о продажах (rapport_ventes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RapportVente {
    pub id: String,
    pub num_vnt: String,
    pub station: Option<String>,
    pub date_vente: Option<NaiveDateTime>,
    pub cod_var: Option<String>,
    pub varietes: Option<String>,
    pub cod_type: Option<String>,
    pub type_ecart: Option<String>,
    pub ref_ach: Option<String>,
    pub acheteurs: Option<String>,
    pub poid_brut: Option<f64>,
    pub poid_pese: Option<f64>,
    pub dif_pese: Option<f64>,
    pub prx_kg: Option<f64>,
    pub montant_vente: Option<f64>,
    pub montant_reglement: f64,
    pub sold_vente: Option<f64>,
    pub date_creation: NaiveDateTime,
    pub date_mise_a_jour: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RapportVenteListQuery {
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// Через запятую, достаточно любого совпадения
    pub station: Option<String>,
    /// Через запятую, достаточно любого совпадения
    pub codvar: Option<String>,
    pub refach: Option<String>,
    pub codtype: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RapportVenteStatsQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub codvar: Option<String>,
    pub station: Option<String>,
    pub period: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenteGlobalStats {
    pub total_ventes: usize,
    pub poids_total_brut: f64,
    pub poids_total_pese: f64,
    pub chiffre_affaires: f64,
    pub montant_regle: f64,
    pub solde_restant: f64,
    pub nombre_acheteurs: usize,
    pub nombre_stations: usize,
    pub nombre_varietes: usize,
    pub prix_moyen_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenteTimelineBucket {
    pub period: String,
    pub total_ventes: usize,
    pub poids_pese: f64,
    pub chiffre_affaires: f64,
    pub montant_regle: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenteStationStat {
    pub station: String,
    pub total_ventes: usize,
    pub poids_pese: f64,
    pub chiffre_affaires: f64,
    pub montant_regle: f64,
    pub solde_restant: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenteVarieteStat {
    pub codvar: Option<String>,
    pub varietes: Option<String>,
    pub total_ventes: usize,
    pub poids_pese: f64,
    pub chiffre_affaires: f64,
    pub prix_moyen: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenteAcheteurStat {
    pub refach: Option<String>,
    pub acheteurs: Option<String>,
    pub total_ventes: usize,
    pub poids_pese: f64,
    pub chiffre_affaires: f64,
    pub montant_regle: f64,
    pub solde_restant: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragePriceStat {
    pub type_ecart: String,
    pub varietes: String,
    pub codvar: Option<String>,
    pub prix_moyen: f64,
    pub poids_pese: f64,
    pub nombre_ventes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTimelinePoint {
    pub period: String,
    pub prix_moyen: f64,
}
