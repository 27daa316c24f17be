use anyhow::Result;
use contracts::domain::a005_decompt_prod::dto::DecomptProd;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "decompt_prod")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub refver: i32,
    pub nomadh: Option<String>,
    pub codvar: i32,
    pub nomvar: Option<String>,
    pub pd_reception: f64,
    pub pdcond: f64,
    pub exp_cat_i: f64,
    pub exp_cat_ii: f64,
    pub pd_ecart: f64,
    pub freinte: f64,
    pub stations: Option<String>,
    pub date_creation: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DecomptProd {
    fn from(m: Model) -> Self {
        DecomptProd {
            id: m.id,
            refver: m.refver,
            nomadh: m.nomadh,
            codvar: m.codvar,
            nomvar: m.nomvar,
            pd_reception: m.pd_reception,
            pdcond: m.pdcond,
            exp_cat_i: m.exp_cat_i,
            exp_cat_ii: m.exp_cat_ii,
            pd_ecart: m.pd_ecart,
            freinte: m.freinte,
            stations: m.stations,
            date_creation: m.date_creation,
        }
    }
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Model>> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?)
}
