use anyhow::Result;
use contracts::domain::a004_rapport_vente::dto::RapportVente;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rapport_ventes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub num_vnt: String,
    pub station: Option<String>,
    pub date_vente: Option<DateTime>,
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
    pub date_creation: DateTime,
    pub date_mise_a_jour: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RapportVente {
    fn from(m: Model) -> Self {
        RapportVente {
            id: m.id,
            num_vnt: m.num_vnt,
            station: m.station,
            date_vente: m.date_vente,
            cod_var: m.cod_var,
            varietes: m.varietes,
            cod_type: m.cod_type,
            type_ecart: m.type_ecart,
            ref_ach: m.ref_ach,
            acheteurs: m.acheteurs,
            poid_brut: m.poid_brut,
            poid_pese: m.poid_pese,
            dif_pese: m.dif_pese,
            prx_kg: m.prx_kg,
            montant_vente: m.montant_vente,
            montant_reglement: m.montant_reglement,
            sold_vente: m.sold_vente,
            date_creation: m.date_creation,
            date_mise_a_jour: m.date_mise_a_jour,
        }
    }
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Model>> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?)
}
