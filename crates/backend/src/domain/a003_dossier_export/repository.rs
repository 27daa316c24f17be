use anyhow::Result;
use contracts::domain::a003_dossier_export::dto::DossierExport;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dossier_export")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub numdos: String,
    pub numtc: Option<String>,
    pub navire: Option<String>,
    pub dtedep: Option<DateTime>,
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
    pub date_creation: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DossierExport {
    fn from(m: Model) -> Self {
        DossierExport {
            id: m.id,
            numdos: m.numdos,
            numtc: m.numtc,
            navire: m.navire,
            dtedep: m.dtedep,
            codpay: m.codpay,
            nompay: m.nompay,
            coddes: m.coddes,
            rsclient: m.rsclient,
            transite: m.transite,
            transpor: m.transpor,
            refexp: m.refexp,
            exporter: m.exporter,
            codvar: m.codvar,
            produit: m.produit,
            nbrpal: m.nbrpal,
            nbrcol: m.nbrcol,
            pdscom: m.pdscom,
            typtrp: m.typtrp,
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
