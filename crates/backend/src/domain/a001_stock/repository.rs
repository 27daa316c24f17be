use anyhow::Result;
use chrono::Local;
use contracts::domain::a001_stock::dto::{
    Stock, StockInput, DEFAULT_ACTIVITY, DEFAULT_CAMPAIGN, DEFAULT_STATION,
};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, DatabaseConnection, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tbl_stock")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub refver: Option<i32>,
    pub refverreel: Option<i32>,
    pub nomprod: Option<String>,
    pub nomver: Option<String>,
    pub poidini: Option<f64>,
    pub pdjr: Option<f64>,
    pub cumultg: Option<f64>,
    pub stockstat: Option<f64>,
    #[sea_orm(column_name = "tcondi")]
    pub conditionnement: Option<f64>,
    pub estimat: Option<f64>,
    pub soldverge: Option<f64>,
    pub codvar: Option<i32>,
    pub nomvar: Option<String>,
    pub user: Option<String>,
    pub station: Option<String>,
    pub activ: Option<String>,
    pub camp: Option<String>,
    pub dteupdate: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Stock {
    fn from(m: Model) -> Self {
        Stock {
            id: m.id,
            refver: m.refver,
            refverreel: m.refverreel,
            nomprod: m.nomprod,
            nomver: m.nomver,
            poidini: m.poidini,
            pdjr: m.pdjr,
            cumultg: m.cumultg,
            stockstat: m.stockstat,
            conditionnement: m.conditionnement,
            estimat: m.estimat,
            soldverge: m.soldverge,
            codvar: m.codvar,
            nomvar: m.nomvar,
            user: m.user,
            station: m.station,
            activ: m.activ,
            camp: m.camp,
            dteupdate: m.dteupdate,
        }
    }
}

fn now() -> DateTime {
    Local::now().naive_local()
}

/// Переносит все поля ввода в строку и проставляет время обновления
fn apply_input(active: &mut ActiveModel, input: &StockInput) {
    active.refver = Set(input.refver);
    active.refverreel = Set(input.refverreel);
    active.nomprod = Set(input.nomprod.clone());
    active.nomver = Set(input.nomver.clone());
    active.poidini = Set(input.poidini);
    active.pdjr = Set(input.pdjr);
    active.cumultg = Set(input.cumultg);
    active.stockstat = Set(input.stockstat);
    active.estimat = Set(input.estimat);
    active.soldverge = Set(input.soldverge);
    active.codvar = Set(input.codvar);
    active.nomvar = Set(input.nomvar.clone());
    active.user = Set(input.user.clone());
    active.station = Set(input.station.clone());
    active.activ = Set(input.activ.clone());
    active.camp = Set(input.camp.clone());
    active.dteupdate = Set(Some(now()));
}

/// Станция, активность и кампания получают значения по умолчанию, если не заданы
pub fn with_defaults(input: &StockInput) -> StockInput {
    StockInput {
        station: input.station.clone().or_else(|| Some(DEFAULT_STATION.to_string())),
        activ: input.activ.clone().or_else(|| Some(DEFAULT_ACTIVITY.to_string())),
        camp: input.camp.clone().or_else(|| Some(DEFAULT_CAMPAIGN.to_string())),
        ..input.clone()
    }
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Вставка новой строки с умолчаниями
pub async fn insert(db: &DatabaseConnection, input: &StockInput) -> Result<Model> {
    let mut active = <ActiveModel as Default>::default();
    apply_input(&mut active, &with_defaults(input));
    Ok(active.insert(db).await?)
}

/// Перезаписывает строку как есть; false, если строки нет
pub async fn update(db: &DatabaseConnection, id: i32, input: &StockInput) -> Result<bool> {
    let Some(existing) = Entity::find_by_id(id).one(db).await? else {
        return Ok(false);
    };

    let mut active: ActiveModel = existing.into();
    apply_input(&mut active, input);
    active.update(db).await?;
    Ok(true)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Естественный ключ строки остатков: код сада и наименование продукта.
/// NULL-часть ключа совпадает только с NULL в колонке.
pub async fn find_id_by_natural_key(
    db: &DatabaseConnection,
    refver: Option<i32>,
    nomprod: Option<&str>,
) -> Result<Option<i32>> {
    let mut condition = Condition::all();
    condition = match refver {
        Some(v) => condition.add(Column::Refver.eq(v)),
        None => condition.add(Column::Refver.is_null()),
    };
    condition = match nomprod {
        Some(v) => condition.add(Column::Nomprod.eq(v)),
        None => condition.add(Column::Nomprod.is_null()),
    };

    let found = Entity::find()
        .filter(condition)
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    Ok(found.map(|m| m.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    fn input(refver: i32, nomprod: &str) -> StockInput {
        StockInput {
            refver: Some(refver),
            nomprod: Some(nomprod.to_string()),
            stockstat: Some(10.0),
            ..StockInput::default()
        }
    }

    #[tokio::test]
    async fn insert_applies_defaults_and_stamps_time() {
        let db = connect_in_memory().await.unwrap();
        let row = insert(&db, &input(7, "Nadorcott")).await.unwrap();

        assert_eq!(row.station.as_deref(), Some(DEFAULT_STATION));
        assert_eq!(row.activ.as_deref(), Some(DEFAULT_ACTIVITY));
        assert_eq!(row.camp.as_deref(), Some(DEFAULT_CAMPAIGN));
        assert!(row.dteupdate.is_some());
        assert_eq!(get_by_id(&db, row.id).await.unwrap(), Some(row));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let db = connect_in_memory().await.unwrap();
        let row = insert(&db, &input(7, "Nadorcott")).await.unwrap();

        let mut changed = input(7, "Nadorcott");
        changed.stockstat = Some(3.5);
        assert!(update(&db, row.id, &changed).await.unwrap());
        let stored = get_by_id(&db, row.id).await.unwrap().unwrap();
        assert_eq!(stored.stockstat, Some(3.5));
        // update пишет ввод как есть, без умолчаний
        assert_eq!(stored.station, None);

        assert!(!update(&db, 999, &changed).await.unwrap());
        assert!(delete(&db, row.id).await.unwrap());
        assert!(!delete(&db, row.id).await.unwrap());
    }

    #[tokio::test]
    async fn natural_key_lookup_treats_null_as_a_value() {
        let db = connect_in_memory().await.unwrap();
        let a = insert(&db, &input(7, "Nadorcott")).await.unwrap();
        let b = insert(&db, &StockInput::default()).await.unwrap();

        assert_eq!(find_id_by_natural_key(&db, Some(7), Some("Nadorcott")).await.unwrap(), Some(a.id));
        assert_eq!(find_id_by_natural_key(&db, None, None).await.unwrap(), Some(b.id));
        assert_eq!(find_id_by_natural_key(&db, Some(7), None).await.unwrap(), None);
    }
}
