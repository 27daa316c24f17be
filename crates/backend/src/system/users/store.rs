use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Учётная запись пользователя, как она хранится
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Входить могут только подтверждённые учётные записи
    pub email_confirmed: bool,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Ошибка `create`/`update`, когда имя уже занято,
/// даже если предыдущий поиск другую запись не видел
#[derive(Debug, Error)]
#[error("Username '{0}' is already taken")]
pub struct UsernameTaken(pub String);

/// Хранилище пользователей и ролей. Имена пользователей и ролей
/// сравниваются без учёта регистра; возвращается сохранённое написание.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_name(&self, username: &str) -> Result<Option<UserRecord>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>>;

    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    async fn count_users(&self) -> Result<u64>;

    async fn create(&self, user: &UserRecord) -> Result<()>;

    /// Перезаписывает профиль, флаг подтверждения и хеш пароля
    async fn update(&self, user: &UserRecord) -> Result<()>;

    /// false, если пользователя нет
    async fn delete(&self, id: &str) -> Result<bool>;

    async fn roles_of(&self, user_id: &str) -> Result<Vec<String>>;

    async fn add_to_role(&self, user_id: &str, role: &str) -> Result<()>;

    /// false, если у пользователя не было роли
    async fn remove_from_role(&self, user_id: &str, role: &str) -> Result<bool>;

    async fn role_exists(&self, role: &str) -> Result<bool>;

    async fn create_role(&self, role: &str) -> Result<()>;

    async fn list_roles(&self) -> Result<Vec<String>>;
}
