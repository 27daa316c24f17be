use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::system::auth::jwt::TokenIssuer;
use crate::system::users::repository::SqliteIdentityStore;
use crate::system::users::store::IdentityStore;

/// Общие ресурсы для всех обработчиков
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub identity: Arc<dyn IdentityStore>,
    pub tokens: Arc<TokenIssuer>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: DatabaseConnection, tokens: TokenIssuer) -> Self {
        Self {
            identity: Arc::new(SqliteIdentityStore::new(db.clone())),
            db,
            tokens: Arc::new(tokens),
            http: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::system::auth::DEFAULT_ROLES;
    use crate::system::users::store::UserRecord;

    pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

    pub async fn state() -> AppState {
        let db = connect_in_memory().await.unwrap();
        let state = AppState::new(
            db,
            TokenIssuer::new(TEST_SECRET, "PackhouseApi", "PackhouseClient", 60),
        );
        for role in DEFAULT_ROLES {
            state.identity.create_role(role).await.unwrap();
        }
        state
    }

    /// Создаёт подтверждённого пользователя с `roles` и отдаёт bearer-токен
    pub async fn token_for(state: &AppState, username: &str, roles: &[&str]) -> String {
        let user = UserRecord {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            first_name: None,
            last_name: None,
            email_confirmed: true,
            password_hash: crate::system::auth::password::hash_password("secret1").unwrap(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        state.identity.create(&user).await.unwrap();
        for role in roles {
            state.identity.add_to_role(&user.id, role).await.unwrap();
        }
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        format!("Bearer {}", state.tokens.issue(&user, &roles).unwrap())
    }
}
