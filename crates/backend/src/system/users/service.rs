use chrono::Utc;
use contracts::system::auth::RegisterRequest;
use contracts::system::users::{UpdateUserRequest, UserProfile, UserSummary};

use super::store::{IdentityStore, UserRecord, UsernameTaken};
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::password;

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const ACCOUNT_DISABLED: &str = "Your account is disabled. Please contact an administrator.";

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_email(email: &str) -> AppResult<()> {
    if !email.contains('@') {
        return Err(AppError::bad_request("Invalid email format"));
    }
    Ok(())
}

/// A name taken between the lookup and the write is still a client error
fn write_error(err: anyhow::Error) -> AppError {
    match err.downcast::<UsernameTaken>() {
        Ok(taken) => AppError::BadRequest(taken.to_string()),
        Err(err) => err.into(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Creates an account. Self-registered accounts start unconfirmed and
/// cannot sign in until an administrator confirms them.
pub async fn create(store: &dyn IdentityStore, request: RegisterRequest, confirmed: bool) -> AppResult<UserRecord> {
    require(&request.username, "Username")?;
    require(&request.email, "Email")?;
    require(&request.password, "Password")?;
    validate_email(&request.email)?;
    password::validate_password_strength(&request.password)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if store.find_by_name(&request.username).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "Username '{}' is already taken",
            request.username
        )));
    }

    let now = Utc::now().to_rfc3339();
    let user = UserRecord {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username.trim().to_string(),
        email: Some(request.email.trim().to_string()),
        first_name: non_blank(request.first_name),
        last_name: non_blank(request.last_name),
        email_confirmed: confirmed,
        password_hash: password::hash_password(&request.password)?,
        created_at: now.clone(),
        updated_at: now,
    };

    store.create(&user).await.map_err(write_error)?;
    tracing::info!("User '{}' created (confirmed: {})", user.username, confirmed);

    Ok(user)
}

/// Checks credentials of an account that may sign in
pub async fn verify_credentials(store: &dyn IdentityStore, username: &str, password: &str) -> AppResult<UserRecord> {
    let user = store
        .find_by_name(username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !user.email_confirmed {
        return Err(AppError::Unauthorized(ACCOUNT_DISABLED.to_string()));
    }

    if !password::verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(user)
}

pub async fn list(store: &dyn IdentityStore) -> AppResult<Vec<UserSummary>> {
    let users = store.list_users().await?;
    let mut summaries = Vec::with_capacity(users.len());

    for user in users {
        let roles = store.roles_of(&user.id).await?;
        summaries.push(UserSummary {
            id: user.id,
            user_name: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            email_confirmed: user.email_confirmed,
            roles,
        });
    }

    Ok(summaries)
}

pub async fn profile(store: &dyn IdentityStore, username: &str) -> AppResult<UserProfile> {
    let user = store
        .find_by_name(username)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let roles = store.roles_of(&user.id).await?;

    Ok(UserProfile {
        user_name: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        roles,
    })
}

/// A non-empty `password` replaces the current one
pub async fn update(store: &dyn IdentityStore, id: &str, request: UpdateUserRequest) -> AppResult<()> {
    let mut user = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if let Some(email) = non_blank(request.email) {
        validate_email(&email)?;
        user.email = Some(email);
    }
    if let Some(username) = non_blank(request.username) {
        if !username.eq_ignore_ascii_case(&user.username) && store.find_by_name(&username).await?.is_some() {
            return Err(AppError::BadRequest(format!("Username '{}' is already taken", username)));
        }
        user.username = username;
    }
    user.first_name = non_blank(request.first_name);
    user.last_name = non_blank(request.last_name);
    user.email_confirmed = request.email_confirmed;

    if let Some(new_password) = non_blank(request.password) {
        password::validate_password_strength(&new_password)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        user.password_hash = password::hash_password(&new_password)?;
    }

    user.updated_at = Utc::now().to_rfc3339();
    store.update(&user).await.map_err(write_error)?;

    Ok(())
}

pub async fn delete(store: &dyn IdentityStore, id: &str) -> AppResult<()> {
    if !store.delete(id).await? {
        return Err(AppError::not_found("User not found"));
    }
    Ok(())
}

/// Role assignment addressed by user id
pub async fn assign_role(store: &dyn IdentityStore, user_id: &str, role: &str) -> AppResult<()> {
    require(user_id, "UserId")?;
    require(role, "RoleName")?;

    let user = store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    if !store.role_exists(role).await? {
        return Err(AppError::BadRequest(format!("Role '{}' does not exist", role)));
    }
    let roles = store.roles_of(&user.id).await?;
    if roles.iter().any(|r| r.eq_ignore_ascii_case(role)) {
        return Err(AppError::BadRequest(format!("User already has role '{}'", role)));
    }

    store.add_to_role(&user.id, role).await?;
    Ok(())
}

/// Role removal addressed by user id
pub async fn remove_role(store: &dyn IdentityStore, user_id: &str, role: &str) -> AppResult<()> {
    require(user_id, "UserId")?;
    require(role, "RoleName")?;

    let user = store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    if !store.role_exists(role).await? {
        return Err(AppError::BadRequest(format!("Role '{}' does not exist", role)));
    }
    if !store.remove_from_role(&user.id, role).await? {
        return Err(AppError::BadRequest(format!("User does not have role '{}'", role)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::system::users::repository::SqliteIdentityStore;
    use async_trait::async_trait;

    async fn store() -> SqliteIdentityStore {
        let store = SqliteIdentityStore::new(connect_in_memory().await.unwrap());
        store.create_role("Manager").await.unwrap();
        store
    }

    fn registration(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "secret1".to_string(),
            first_name: Some("Karim".to_string()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn registered_account_cannot_sign_in_until_confirmed() {
        let store = store().await;
        create(&store, registration("karim"), false).await.unwrap();

        let err = verify_credentials(&store, "karim", "secret1").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref m) if m == ACCOUNT_DISABLED));

        let user = store.find_by_name("karim").await.unwrap().unwrap();
        let confirm = UpdateUserRequest {
            email_confirmed: true,
            ..UpdateUserRequest::default()
        };
        update(&store, &user.id, confirm).await.unwrap();

        let signed_in = verify_credentials(&store, "karim", "secret1").await.unwrap();
        assert_eq!(signed_in.id, user.id);
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let store = store().await;
        create(&store, registration("karim"), true).await.unwrap();

        assert!(matches!(
            verify_credentials(&store, "karim", "wrong-one").await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            verify_credentials(&store, "ghost", "secret1").await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn registration_validation() {
        let store = store().await;
        create(&store, registration("karim"), false).await.unwrap();

        let duplicate = create(&store, registration("KARIM"), false).await;
        assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

        let mut short = registration("amine");
        short.password = "123".to_string();
        assert!(matches!(create(&store, short, false).await, Err(AppError::BadRequest(_))));

        let mut no_email = registration("amine");
        no_email.email = String::new();
        assert!(matches!(create(&store, no_email, false).await, Err(AppError::BadRequest(_))));
    }

    /// Lookup by name never sees the other account, as when two
    /// registrations for the same name interleave
    struct BlindLookup(SqliteIdentityStore);

    #[async_trait]
    impl IdentityStore for BlindLookup {
        async fn find_by_name(&self, _username: &str) -> anyhow::Result<Option<UserRecord>> {
            Ok(None)
        }
        async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<UserRecord>> {
            self.0.find_by_id(id).await
        }
        async fn list_users(&self) -> anyhow::Result<Vec<UserRecord>> {
            self.0.list_users().await
        }
        async fn count_users(&self) -> anyhow::Result<u64> {
            self.0.count_users().await
        }
        async fn create(&self, user: &UserRecord) -> anyhow::Result<()> {
            self.0.create(user).await
        }
        async fn update(&self, user: &UserRecord) -> anyhow::Result<()> {
            self.0.update(user).await
        }
        async fn delete(&self, id: &str) -> anyhow::Result<bool> {
            self.0.delete(id).await
        }
        async fn roles_of(&self, user_id: &str) -> anyhow::Result<Vec<String>> {
            self.0.roles_of(user_id).await
        }
        async fn add_to_role(&self, user_id: &str, role: &str) -> anyhow::Result<()> {
            self.0.add_to_role(user_id, role).await
        }
        async fn remove_from_role(&self, user_id: &str, role: &str) -> anyhow::Result<bool> {
            self.0.remove_from_role(user_id, role).await
        }
        async fn role_exists(&self, role: &str) -> anyhow::Result<bool> {
            self.0.role_exists(role).await
        }
        async fn create_role(&self, role: &str) -> anyhow::Result<()> {
            self.0.create_role(role).await
        }
        async fn list_roles(&self) -> anyhow::Result<Vec<String>> {
            self.0.list_roles().await
        }
    }

    #[tokio::test]
    async fn name_taken_at_insert_time_is_a_bad_request() {
        let store = BlindLookup(store().await);
        create(&store, registration("karim"), false).await.unwrap();

        let err = create(&store, registration("Karim"), false).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("already taken")));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn password_is_replaced_only_when_given() {
        let store = store().await;
        let user = create(&store, registration("karim"), true).await.unwrap();

        let keep = UpdateUserRequest {
            email_confirmed: true,
            password: Some(String::new()),
            ..UpdateUserRequest::default()
        };
        update(&store, &user.id, keep).await.unwrap();
        assert!(verify_credentials(&store, "karim", "secret1").await.is_ok());

        let replace = UpdateUserRequest {
            email_confirmed: true,
            password: Some("another1".to_string()),
            ..UpdateUserRequest::default()
        };
        update(&store, &user.id, replace).await.unwrap();
        assert!(verify_credentials(&store, "karim", "another1").await.is_ok());
    }

    #[tokio::test]
    async fn role_assignment_rules() {
        let store = store().await;
        let user = create(&store, registration("karim"), true).await.unwrap();

        assign_role(&store, &user.id, "Manager").await.unwrap();
        assert!(matches!(
            assign_role(&store, &user.id, "Manager").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            assign_role(&store, &user.id, "Ghost").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            assign_role(&store, "missing", "Manager").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(assign_role(&store, "", "Manager").await, Err(AppError::BadRequest(_))));

        remove_role(&store, &user.id, "Manager").await.unwrap();
        assert!(matches!(
            remove_role(&store, &user.id, "Manager").await,
            Err(AppError::BadRequest(_))
        ));
    }
}
