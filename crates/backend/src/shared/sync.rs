//! Сверка внешнего списка с хранимыми строками: вставка или обновление.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::shared::error::AppError;

/// Сторона хранения при синхронизации, адресация по естественному ключу
#[async_trait]
pub trait UpsertStore<T: Sync>: Send + Sync {
    type Key: Send + Sync;
    type Id: Send;

    fn natural_key(&self, item: &T) -> Self::Key;

    async fn find_by_key(&self, key: &Self::Key) -> anyhow::Result<Option<Self::Id>>;

    /// Перезаписывает все изменяемые поля и обновляет метку времени
    async fn update(&self, id: Self::Id, item: &T) -> anyhow::Result<()>;

    /// Вставляет строку, подставляя умолчания для незаданных полей
    async fn insert(&self, item: &T) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub processed: usize,
    pub added: usize,
    pub updated: usize,
}

/// Каждая позиция сохраняется отдельно: при сбое посередине
/// уже записанные строки остаются.
pub async fn synchronize<T, S>(store: &S, items: &[T]) -> anyhow::Result<SyncSummary>
where
    T: Sync,
    S: UpsertStore<T> + ?Sized,
{
    let mut summary = SyncSummary::default();

    for item in items {
        let key = store.natural_key(item);
        match store.find_by_key(&key).await? {
            Some(id) => {
                store.update(id, item).await?;
                summary.updated += 1;
            }
            None => {
                store.insert(item).await?;
                summary.added += 1;
            }
        }
        summary.processed += 1;
    }

    Ok(summary)
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Upstream API returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Upstream API returned no items")]
    Empty,

    #[error("Upstream payload could not be read: {0}")]
    Payload(String),

    #[error("Upstream API request failed")]
    Transport(#[from] reqwest::Error),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(source) => {
                AppError::internal("Failed to reach the upstream API", source)
            }
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

/// GET `url` и разбор непустого JSON-массива
pub async fn fetch_items<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<T>, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    let body = response.text().await?;
    decode_items(&body)
}

/// Имена полей без учёта регистра: ключи приводятся к нижнему регистру,
/// поэтому поля `T` должны быть в нижнем регистре.
pub fn decode_items<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;

    let entries = match value {
        Value::Null => return Err(FetchError::Empty),
        Value::Array(entries) => entries,
        _ => return Err(FetchError::Payload("expected a JSON array".to_string())),
    };
    if entries.is_empty() {
        return Err(FetchError::Empty);
    }

    entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value(lowercase_keys(entry))
                .map_err(|e| FetchError::Payload(e.to_string()))
        })
        .collect()
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect(),
        ),
        other => other,
    }
}
