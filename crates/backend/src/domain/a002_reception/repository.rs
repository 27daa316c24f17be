use anyhow::Result;
use contracts::domain::a002_reception::dto::Reception;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tb_reception")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub dtupdate: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Reception {
    fn from(m: Model) -> Self {
        Reception {
            id: m.id,
            refver: m.refver,
            codvar: m.codvar,
            station: m.station,
            nomver: m.nomver,
            producteur: m.producteur,
            nomvar: m.nomvar,
            pdpese: m.pdpese,
            pdrecjr: m.pdrecjr,
            pdrectotal: m.pdrectotal,
            pdcond: m.pdcond,
            stockstat: m.stockstat,
            estima: m.estima,
            soldverg: m.soldverg,
            camp: m.camp,
            dtupdate: m.dtupdate,
        }
    }
}

/// Таблица наполняется внешней процедурой, API только читает её
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}
