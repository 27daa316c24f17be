use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Приёмка продукции (tb_reception)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reception {
    pub id: String,
    pub refver: i32,
    pub codvar: i32,
    pub station: String,
    pub nomver: Option<String>,
    pub producteur: Option<String>,
    pub nomvar: Option<String>,
    pub pdpese: Option<f64>,
    pub pdrecjr: Option<f64>,
    pub pdrectotal: Option<f64>,
    pub pdcond: Option<f64>,
    pub stockstat: Option<f64>,
    pub estima: Option<f64>,
    pub soldverg: Option<f64>,
    pub camp: Option<String>,
    pub dtupdate: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionStats {
    pub total_items: usize,
    /// Σ pdrectotal
    pub total_cumultg: f64,
    pub total_stockstat: f64,
    pub by_variete: Vec<ReceptionVarieteStat>,
    pub by_verger: Vec<ReceptionVergerStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionVarieteStat {
    pub codvar: i32,
    pub count: usize,
    pub total_stock: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionVergerStat {
    pub refver: i32,
    pub count: usize,
    pub total_stock: f64,
}
