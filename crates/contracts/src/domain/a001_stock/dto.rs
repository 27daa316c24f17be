use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATION: &str = "COOPERATIVE ZAOUIA";
pub const DEFAULT_ACTIVITY: &str = "Station de Conditionnement";
pub const DEFAULT_CAMPAIGN: &str = "24-25";

/// Складская позиция (tbl_stock)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: i32,
    pub refver: Option<i32>,
    pub refverreel: Option<i32>,
    pub nomprod: Option<String>,
    pub nomver: Option<String>,
    pub poidini: Option<f64>,
    pub pdjr: Option<f64>,
    pub cumultg: Option<f64>,
    pub stockstat: Option<f64>,
    pub conditionnement: Option<f64>,
    pub estimat: Option<f64>,
    pub soldverge: Option<f64>,
    pub codvar: Option<i32>,
    pub nomvar: Option<String>,
    pub user: Option<String>,
    pub station: Option<String>,
    pub activ: Option<String>,
    pub camp: Option<String>,
    pub dteupdate: Option<NaiveDateTime>,
}

/// Тело запросов create и update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockInput {
    pub refver: Option<i32>,
    pub refverreel: Option<i32>,
    pub nomprod: Option<String>,
    pub nomver: Option<String>,
    pub poidini: Option<f64>,
    pub pdjr: Option<f64>,
    pub cumultg: Option<f64>,
    pub stockstat: Option<f64>,
    pub estimat: Option<f64>,
    pub soldverge: Option<f64>,
    pub codvar: Option<i32>,
    pub nomvar: Option<String>,
    pub user: Option<String>,
    pub station: Option<String>,
    pub activ: Option<String>,
    pub camp: Option<String>,
}

/// Фильтры точного совпадения `GET /api/stock/filter`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockFilterQuery {
    pub camp: Option<String>,
    pub nomvar: Option<String>,
    pub nomver: Option<String>,
    pub station: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStats {
    pub total_items: usize,
    pub total_poidini: f64,
    pub total_cumultg: f64,
    pub total_stockstat: f64,
    pub by_variete: Vec<StockVarieteStat>,
    pub by_verger: Vec<StockVergerStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockVarieteStat {
    pub variete: Option<String>,
    pub count: usize,
    pub total_stock: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockVergerStat {
    pub verger: Option<String>,
    pub count: usize,
    pub total_stock: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub message: String,
    pub items_processed: usize,
    pub items_added: usize,
    pub items_updated: usize,
}

/// Позиция внешнего списка остатков. Ключи синхронизатор сравнивает
/// без учёта регистра, приводя их к нижнему регистру перед разбором.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalStockItem {
    pub refver: Option<i32>,
    pub refverreel: Option<i32>,
    pub nomprod: Option<String>,
    pub nomver: Option<String>,
    pub poidini: Option<f64>,
    pub pdjr: Option<f64>,
    pub cumultg: Option<f64>,
    pub stockstat: Option<f64>,
    pub estimat: Option<f64>,
    pub soldverge: Option<f64>,
    pub codvar: Option<i32>,
    pub nomvar: Option<String>,
    pub user: Option<String>,
    pub station: Option<String>,
    pub activ: Option<String>,
    pub camp: Option<String>,
}

/// Внешний список и ручной ввод пишут один набор полей
impl From<&ExternalStockItem> for StockInput {
    fn from(item: &ExternalStockItem) -> Self {
        StockInput {
            refver: item.refver,
            refverreel: item.refverreel,
            nomprod: item.nomprod.clone(),
            nomver: item.nomver.clone(),
            poidini: item.poidini,
            pdjr: item.pdjr,
            cumultg: item.cumultg,
            stockstat: item.stockstat,
            estimat: item.estimat,
            soldverge: item.soldverge,
            codvar: item.codvar,
            nomvar: item.nomvar.clone(),
            user: item.user.clone(),
            station: item.station.clone(),
            activ: item.activ.clone(),
            camp: item.camp.clone(),
        }
    }
}
