use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, SqlErr, Statement};

use super::store::{IdentityStore, UserRecord, UsernameTaken};

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, email_confirmed, created_at, updated_at";

/// Хранилище пользователей поверх sys_users / sys_roles / sys_user_roles
#[derive(Clone)]
pub struct SqliteIdentityStore {
    conn: DatabaseConnection,
}

impl SqliteIdentityStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// При гонке записей решает UNIQUE-индекс по username
    fn write_error(err: DbErr, user: &UserRecord, action: &'static str) -> anyhow::Error {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => UsernameTaken(user.username.clone()).into(),
            _ => anyhow::Error::new(err).context(action),
        }
    }

    async fn query_user(&self, sql: String, value: &str) -> Result<Option<UserRecord>> {
        let row = self
            .conn
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                sql,
                [value.into()],
            ))
            .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    async fn role_id(&self, role: &str) -> Result<Option<String>> {
        let row = self
            .conn
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT id FROM sys_roles WHERE name = ?",
                [role.into()],
            ))
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("", "id")?)),
            None => Ok(None),
        }
    }
}

fn user_from_row(row: &QueryResult) -> Result<UserRecord> {
    Ok(UserRecord {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        first_name: row.try_get("", "first_name")?,
        last_name: row.try_get("", "last_name")?,
        password_hash: row.try_get("", "password_hash")?,
        email_confirmed: row.try_get::<i32>("", "email_confirmed")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
    })
}

#[async_trait]
impl IdentityStore for SqliteIdentityStore {
    async fn find_by_name(&self, username: &str) -> Result<Option<UserRecord>> {
        self.query_user(
            format!("SELECT {} FROM sys_users WHERE username = ?", USER_COLUMNS),
            username,
        )
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        self.query_user(
            format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS),
            id,
        )
        .await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let rows = self
            .conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!("SELECT {} FROM sys_users ORDER BY username", USER_COLUMNS),
            ))
            .await?;

        rows.iter().map(user_from_row).collect()
    }

    async fn count_users(&self) -> Result<u64> {
        let row = self
            .conn
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT COUNT(*) AS count FROM sys_users".to_string(),
            ))
            .await?
            .context("COUNT query returned no row")?;

        let count: i64 = row.try_get("", "count")?;
        Ok(count.max(0) as u64)
    }

    async fn create(&self, user: &UserRecord) -> Result<()> {
        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                format!(
                    "INSERT INTO sys_users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    USER_COLUMNS
                ),
                [
                    user.id.clone().into(),
                    user.username.clone().into(),
                    user.email.clone().into(),
                    user.first_name.clone().into(),
                    user.last_name.clone().into(),
                    user.password_hash.clone().into(),
                    i32::from(user.email_confirmed).into(),
                    user.created_at.clone().into(),
                    user.updated_at.clone().into(),
                ],
            ))
            .await
            .map_err(|e| Self::write_error(e, user, "Failed to insert user"))?;

        Ok(())
    }

    async fn update(&self, user: &UserRecord) -> Result<()> {
        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "UPDATE sys_users
                 SET username = ?, email = ?, first_name = ?, last_name = ?, password_hash = ?,
                     email_confirmed = ?, updated_at = ?
                 WHERE id = ?",
                [
                    user.username.clone().into(),
                    user.email.clone().into(),
                    user.first_name.clone().into(),
                    user.last_name.clone().into(),
                    user.password_hash.clone().into(),
                    i32::from(user.email_confirmed).into(),
                    user.updated_at.clone().into(),
                    user.id.clone().into(),
                ],
            ))
            .await
            .map_err(|e| Self::write_error(e, user, "Failed to update user"))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "DELETE FROM sys_user_roles WHERE user_id = ?",
                [id.into()],
            ))
            .await
            .context("Failed to delete user roles")?;

        let result = self
            .conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "DELETE FROM sys_users WHERE id = ?",
                [id.into()],
            ))
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected() > 0)
    }

    async fn roles_of(&self, user_id: &str) -> Result<Vec<String>> {
        let rows = self
            .conn
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT r.name FROM sys_roles r
                 JOIN sys_user_roles ur ON ur.role_id = r.id
                 WHERE ur.user_id = ?
                 ORDER BY r.name",
                [user_id.into()],
            ))
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String>("", "name").map_err(Into::into))
            .collect()
    }

    async fn add_to_role(&self, user_id: &str, role: &str) -> Result<()> {
        let role_id = self
            .role_id(role)
            .await?
            .with_context(|| format!("Role '{}' does not exist", role))?;

        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "INSERT OR IGNORE INTO sys_user_roles (user_id, role_id) VALUES (?, ?)",
                [user_id.into(), role_id.into()],
            ))
            .await
            .context("Failed to assign role")?;

        Ok(())
    }

    async fn remove_from_role(&self, user_id: &str, role: &str) -> Result<bool> {
        let Some(role_id) = self.role_id(role).await? else {
            return Ok(false);
        };

        let result = self
            .conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "DELETE FROM sys_user_roles WHERE user_id = ? AND role_id = ?",
                [user_id.into(), role_id.into()],
            ))
            .await
            .context("Failed to remove role")?;

        Ok(result.rows_affected() > 0)
    }

    async fn role_exists(&self, role: &str) -> Result<bool> {
        Ok(self.role_id(role).await?.is_some())
    }

    async fn create_role(&self, role: &str) -> Result<()> {
        self.conn
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "INSERT INTO sys_roles (id, name) VALUES (?, ?)",
                [uuid::Uuid::new_v4().to_string().into(), role.into()],
            ))
            .await
            .with_context(|| format!("Failed to create role '{}'", role))?;

        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<String>> {
        let rows = self
            .conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sys_roles ORDER BY name".to_string(),
            ))
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String>("", "name").map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    fn record(id: &str, username: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            first_name: None,
            last_name: None,
            email_confirmed: false,
            password_hash: "hash".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    async fn store() -> SqliteIdentityStore {
        SqliteIdentityStore::new(connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn users_are_found_by_name_ignoring_case() {
        let store = store().await;
        store.create(&record("u1", "Karim")).await.unwrap();

        let found = store.find_by_name("karim").await.unwrap().unwrap();
        assert_eq!(found.username, "Karim");
        assert_eq!(found.email.as_deref(), Some("Karim@example.com"));
        assert!(!found.email_confirmed);
        assert!(store.find_by_name("nobody").await.unwrap().is_none());
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_reported_as_taken() {
        let store = store().await;
        store.create(&record("u1", "Karim")).await.unwrap();

        let err = store.create(&record("u2", "KARIM")).await.unwrap_err();
        let taken = err.downcast_ref::<UsernameTaken>().unwrap();
        assert_eq!(taken.0, "KARIM");
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn role_membership_round_trip() {
        let store = store().await;
        store.create(&record("u1", "karim")).await.unwrap();
        store.create_role("Manager").await.unwrap();

        assert!(store.role_exists("manager").await.unwrap());
        store.add_to_role("u1", "manager").await.unwrap();
        assert_eq!(store.roles_of("u1").await.unwrap(), vec!["Manager"]);

        assert!(store.remove_from_role("u1", "Manager").await.unwrap());
        assert!(!store.remove_from_role("u1", "Manager").await.unwrap());
        assert!(store.roles_of("u1").await.unwrap().is_empty());
        assert!(store.add_to_role("u1", "Ghost").await.is_err());
    }

    #[tokio::test]
    async fn delete_reports_missing_users() {
        let store = store().await;
        store.create(&record("u1", "karim")).await.unwrap();
        store.create_role("Admin").await.unwrap();
        store.add_to_role("u1", "Admin").await.unwrap();

        assert!(store.delete("u1").await.unwrap());
        assert!(!store.delete("u1").await.unwrap());
        assert!(store.find_by_id("u1").await.unwrap().is_none());
    }
}
