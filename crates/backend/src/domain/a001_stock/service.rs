use anyhow::Result;
use contracts::domain::a001_stock::dto::{
    Stock, StockFilterQuery, StockInput, StockStats, StockVarieteStat, StockVergerStat,
};
use sea_orm::DatabaseConnection;

use super::repository::{self, Model};
use crate::shared::query::aggregate::{group_by, sum};
use crate::shared::query::sort::{sort_rows, Direction, SortValue};
use crate::shared::query::Filter;

fn codvar_plus_refverreel(m: &Model) -> SortValue<'_> {
    SortValue::Int(
        m.codvar
            .zip(m.refverreel)
            .map(|(codvar, refverreel)| i64::from(codvar) + i64::from(refverreel)),
    )
}

fn dteupdate(m: &Model) -> SortValue<'_> {
    SortValue::Date(m.dteupdate)
}

/// Все позиции, по убыванию codvar + refverreel (пустые суммы в конце)
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Stock>> {
    let mut rows = repository::list_all(db).await?;
    sort_rows(&mut rows, codvar_plus_refverreel, Direction::Desc);
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Фильтр по точному совпадению, свежие обновления первыми
pub async fn filter(db: &DatabaseConnection, query: &StockFilterQuery) -> Result<Vec<Stock>> {
    let filter = Filter::new()
        .equals(|m: &Model| m.camp.as_deref(), query.camp.as_deref())
        .equals(|m: &Model| m.nomvar.as_deref(), query.nomvar.as_deref())
        .equals(|m: &Model| m.nomver.as_deref(), query.nomver.as_deref())
        .equals(|m: &Model| m.station.as_deref(), query.station.as_deref());

    let mut rows = filter.apply(repository::list_all(db).await?);
    sort_rows(&mut rows, dteupdate, Direction::Desc);
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn stats(db: &DatabaseConnection) -> Result<StockStats> {
    let rows = repository::list_all(db).await?;
    Ok(compute_stats(&rows))
}

fn compute_stats(rows: &[Model]) -> StockStats {
    let by_variete = group_by(rows, |m| m.nomvar.clone())
        .into_iter()
        .map(|g| StockVarieteStat {
            count: g.rows.len(),
            total_stock: sum(&g.rows, |m| m.stockstat),
            variete: g.key,
        })
        .collect();

    let by_verger = group_by(rows, |m| m.nomver.clone())
        .into_iter()
        .map(|g| StockVergerStat {
            count: g.rows.len(),
            total_stock: sum(&g.rows, |m| m.stockstat),
            verger: g.key,
        })
        .collect();

    StockStats {
        total_items: rows.len(),
        total_poidini: sum(rows, |m| m.poidini),
        total_cumultg: sum(rows, |m| m.cumultg),
        total_stockstat: sum(rows, |m| m.stockstat),
        by_variete,
        by_verger,
    }
}

pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Stock>> {
    Ok(repository::get_by_id(db, id).await?.map(Into::into))
}

pub async fn create(db: &DatabaseConnection, input: &StockInput) -> Result<Stock> {
    let row = repository::insert(db, input).await?;
    tracing::info!("Stock {} created", row.id);
    Ok(row.into())
}

pub async fn update(db: &DatabaseConnection, id: i32, input: &StockInput) -> Result<bool> {
    repository::update(db, id, input).await
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool> {
    repository::delete(db, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    fn line(codvar: Option<i32>, refverreel: Option<i32>, nomvar: Option<&str>, stockstat: f64) -> StockInput {
        StockInput {
            codvar,
            refverreel,
            nomvar: nomvar.map(str::to_string),
            nomver: Some("Verger A".to_string()),
            stockstat: Some(stockstat),
            poidini: Some(1.0),
            ..StockInput::default()
        }
    }

    #[tokio::test]
    async fn list_orders_by_code_sum_with_nulls_last() {
        let db = connect_in_memory().await.unwrap();
        repository::insert(&db, &line(Some(1), Some(1), Some("Nour"), 1.0)).await.unwrap();
        repository::insert(&db, &line(None, Some(50), Some("Nour"), 1.0)).await.unwrap();
        repository::insert(&db, &line(Some(10), Some(5), Some("Afourer"), 1.0)).await.unwrap();

        let rows = list(&db).await.unwrap();
        let codvars: Vec<_> = rows.iter().map(|s| s.codvar).collect();
        assert_eq!(codvars, vec![Some(10), Some(1), None]);
    }

    #[tokio::test]
    async fn stats_group_including_null_keys() {
        let db = connect_in_memory().await.unwrap();
        repository::insert(&db, &line(Some(1), Some(1), Some("Nour"), 4.0)).await.unwrap();
        repository::insert(&db, &line(Some(2), Some(1), None, 2.5)).await.unwrap();
        repository::insert(&db, &line(Some(3), Some(1), Some("Nour"), 1.0)).await.unwrap();

        let stats = stats(&db).await.unwrap();
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_stockstat, 7.5);
        assert_eq!(stats.total_poidini, 3.0);
        assert_eq!(stats.total_cumultg, 0.0);
        assert_eq!(stats.by_variete.len(), 2);
        assert_eq!(stats.by_variete[0].variete.as_deref(), Some("Nour"));
        assert_eq!(stats.by_variete[0].count, 2);
        assert_eq!(stats.by_variete[0].total_stock, 5.0);
        assert_eq!(stats.by_variete[1].variete, None);
        assert_eq!(stats.by_verger.len(), 1);
    }

    #[tokio::test]
    async fn filter_is_exact_and_open_when_empty() {
        let db = connect_in_memory().await.unwrap();
        repository::insert(&db, &line(Some(1), Some(1), Some("Nour"), 4.0)).await.unwrap();
        repository::insert(&db, &line(Some(2), Some(1), Some("Nour Extra"), 2.0)).await.unwrap();

        let query = StockFilterQuery {
            nomvar: Some("Nour".to_string()),
            ..StockFilterQuery::default()
        };
        assert_eq!(filter(&db, &query).await.unwrap().len(), 1);
        assert_eq!(filter(&db, &StockFilterQuery::default()).await.unwrap().len(), 2);
    }
}
