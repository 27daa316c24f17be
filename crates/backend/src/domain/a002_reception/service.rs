use anyhow::Result;
use contracts::domain::a002_reception::dto::{
    Reception, ReceptionStats, ReceptionVarieteStat, ReceptionVergerStat,
};
use sea_orm::DatabaseConnection;

use super::repository::{self, Model};
use crate::shared::query::aggregate::{group_by, sum};
use crate::shared::query::sort::{sort_rows, Direction, SortValue};

fn codvar_plus_refver(m: &Model) -> SortValue<'_> {
    SortValue::Int(Some(i64::from(m.codvar) + i64::from(m.refver)))
}

/// Строки приёмки по убыванию codvar + refver
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Reception>> {
    let mut rows = repository::list_all(db).await?;
    sort_rows(&mut rows, codvar_plus_refver, Direction::Desc);
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn stats(db: &DatabaseConnection) -> Result<ReceptionStats> {
    let rows = repository::list_all(db).await?;

    let by_variete = group_by(&rows, |m| m.codvar)
        .into_iter()
        .map(|g| ReceptionVarieteStat {
            codvar: g.key,
            count: g.rows.len(),
            total_stock: sum(&g.rows, |m| m.stockstat),
        })
        .collect();

    let by_verger = group_by(&rows, |m| m.refver)
        .into_iter()
        .map(|g| ReceptionVergerStat {
            refver: g.key,
            count: g.rows.len(),
            total_stock: sum(&g.rows, |m| m.stockstat),
        })
        .collect();

    Ok(ReceptionStats {
        total_items: rows.len(),
        total_cumultg: sum(&rows, |m| m.pdrectotal),
        total_stockstat: sum(&rows, |m| m.stockstat),
        by_variete,
        by_verger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use sea_orm::{ActiveModelTrait, Set};

    async fn seed(db: &DatabaseConnection, id: &str, refver: i32, codvar: i32, total: f64, stock: Option<f64>) {
        repository::ActiveModel {
            id: Set(id.to_string()),
            refver: Set(refver),
            codvar: Set(codvar),
            station: Set("zaouia".to_string()),
            pdrectotal: Set(Some(total)),
            stockstat: Set(stock),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn list_is_ordered_by_code_sum() {
        let db = connect_in_memory().await.unwrap();
        seed(&db, "a", 1, 2, 0.0, None).await;
        seed(&db, "b", 100, 5, 0.0, None).await;
        seed(&db, "c", 10, 3, 0.0, None).await;

        let ids: Vec<String> = list(&db).await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn stats_sum_received_weight_and_group_by_codes() {
        let db = connect_in_memory().await.unwrap();
        seed(&db, "a", 1, 7, 100.0, Some(5.0)).await;
        seed(&db, "b", 2, 7, 50.5, None).await;
        seed(&db, "c", 1, 8, 10.0, Some(1.5)).await;

        let stats = stats(&db).await.unwrap();
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_cumultg, 160.5);
        assert_eq!(stats.total_stockstat, 6.5);

        assert_eq!(stats.by_variete.len(), 2);
        assert_eq!(stats.by_variete[0].codvar, 7);
        assert_eq!(stats.by_variete[0].count, 2);
        assert_eq!(stats.by_variete[0].total_stock, 5.0);

        assert_eq!(stats.by_verger.len(), 2);
        assert_eq!(stats.by_verger[0].refver, 1);
        assert_eq!(stats.by_verger[0].total_stock, 6.5);
    }
}
