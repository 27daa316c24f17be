use anyhow::Result;
use async_trait::async_trait;
use contracts::domain::a001_stock::dto::{ExternalStockItem, StockInput, SyncResponse};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::error::AppResult;
use crate::shared::sync::{fetch_items, synchronize, UpsertStore};

/// Таблица остатков как цель синхронизации, ключ (refver, nomprod)
pub struct StockSyncStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StockSyncStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UpsertStore<ExternalStockItem> for StockSyncStore<'_> {
    type Key = (Option<i32>, Option<String>);
    type Id = i32;

    fn natural_key(&self, item: &ExternalStockItem) -> Self::Key {
        (item.refver, item.nomprod.clone())
    }

    async fn find_by_key(&self, key: &Self::Key) -> Result<Option<i32>> {
        repository::find_id_by_natural_key(self.db, key.0, key.1.as_deref()).await
    }

    async fn update(&self, id: i32, item: &ExternalStockItem) -> Result<()> {
        let input = repository::with_defaults(&StockInput::from(item));
        repository::update(self.db, id, &input).await?;
        Ok(())
    }

    async fn insert(&self, item: &ExternalStockItem) -> Result<()> {
        repository::insert(self.db, &StockInput::from(item)).await?;
        Ok(())
    }
}

/// Забирает внешний список по `api_url` и делает upsert каждой позиции
pub async fn sync_from_api(
    db: &DatabaseConnection,
    client: &reqwest::Client,
    api_url: &str,
) -> AppResult<SyncResponse> {
    tracing::info!("Stock sync: fetching {}", api_url);
    let items: Vec<ExternalStockItem> = fetch_items(client, api_url).await?;

    let summary = synchronize(&StockSyncStore::new(db), &items).await?;
    tracing::info!(
        "Stock sync finished: {} processed, {} added, {} updated",
        summary.processed,
        summary.added,
        summary.updated
    );

    Ok(SyncResponse {
        message: "Stock synchronized successfully".to_string(),
        items_processed: summary.processed,
        items_added: summary.added,
        items_updated: summary.updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::sync::{decode_items, SyncSummary};
    use contracts::domain::a001_stock::dto::DEFAULT_STATION;

    const FEED: &str = r#"[
        {"REFVER": 101, "NOMPROD": "Nadorcott", "stockstat": 12.5, "codvar": 4},
        {"refver": 102, "nomprod": "Afourer", "Station": "Berkane"},
        {"refver": null, "nomprod": null}
    ]"#;

    #[tokio::test]
    async fn repeated_sync_updates_instead_of_duplicating() {
        let db = connect_in_memory().await.unwrap();
        let items: Vec<ExternalStockItem> = decode_items(FEED).unwrap();
        let store = StockSyncStore::new(&db);

        let first = synchronize(&store, &items).await.unwrap();
        assert_eq!(first, SyncSummary { processed: 3, added: 3, updated: 0 });

        let second = synchronize(&store, &items).await.unwrap();
        assert_eq!(second, SyncSummary { processed: 3, added: 0, updated: 3 });

        let rows = repository::list_all(&db).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].station.as_deref(), Some(DEFAULT_STATION));
        assert_eq!(rows[1].station.as_deref(), Some("Berkane"));
        assert_eq!(rows[0].stockstat, Some(12.5));
    }
}
