use crate::shared::error::{AppError, AppResult};
use crate::system::users::store::IdentityStore;

pub async fn create(store: &dyn IdentityStore, role: &str) -> AppResult<()> {
    let role = role.trim();
    if role.is_empty() {
        return Err(AppError::bad_request("RoleName is required"));
    }
    if store.role_exists(role).await? {
        return Err(AppError::BadRequest(format!("Role '{}' already exists", role)));
    }

    store.create_role(role).await?;
    tracing::info!("Role '{}' created", role);
    Ok(())
}

pub async fn list(store: &dyn IdentityStore) -> AppResult<Vec<String>> {
    Ok(store.list_roles().await?)
}

/// Role assignment addressed by user name
pub async fn assign(store: &dyn IdentityStore, username: &str, role: &str) -> AppResult<()> {
    let user = store
        .find_by_name(username)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    if !store.role_exists(role).await? {
        return Err(AppError::not_found("Role not found"));
    }

    let held = store.roles_of(&user.id).await?;
    if held.iter().any(|r| r.eq_ignore_ascii_case(role)) {
        return Err(AppError::BadRequest(format!(
            "User '{}' already has role '{}'",
            user.username, role
        )));
    }

    store.add_to_role(&user.id, role).await?;
    tracing::info!("Role '{}' assigned to '{}'", role, user.username);
    Ok(())
}

pub async fn remove(store: &dyn IdentityStore, username: &str, role: &str) -> AppResult<()> {
    let user = store
        .find_by_name(username)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !store.remove_from_role(&user.id, role).await? {
        return Err(AppError::BadRequest(format!(
            "User '{}' does not have role '{}'",
            user.username, role
        )));
    }

    tracing::info!("Role '{}' removed from '{}'", role, user.username);
    Ok(())
}

pub async fn roles_of_user(store: &dyn IdentityStore, username: &str) -> AppResult<Vec<String>> {
    let user = store
        .find_by_name(username)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(store.roles_of(&user.id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::system::users::repository::SqliteIdentityStore;
    use crate::system::users::store::UserRecord;

    async fn store_with_user() -> SqliteIdentityStore {
        let store = SqliteIdentityStore::new(connect_in_memory().await.unwrap());
        store
            .create(&UserRecord {
                id: "u1".to_string(),
                username: "karim".to_string(),
                email: None,
                first_name: None,
                last_name: None,
                email_confirmed: true,
                password_hash: "hash".to_string(),
                created_at: String::new(),
                updated_at: String::new(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn duplicate_role_is_rejected() {
        let store = store_with_user().await;
        create(&store, "Manager").await.unwrap();
        assert!(matches!(create(&store, "manager").await, Err(AppError::BadRequest(_))));
        assert_eq!(list(&store).await.unwrap(), vec!["Manager"]);
    }

    #[tokio::test]
    async fn assign_and_remove_by_username() {
        let store = store_with_user().await;
        create(&store, "Manager").await.unwrap();

        assert!(matches!(assign(&store, "ghost", "Manager").await, Err(AppError::NotFound(_))));
        assert!(matches!(assign(&store, "karim", "Ghost").await, Err(AppError::NotFound(_))));

        assign(&store, "karim", "Manager").await.unwrap();
        assert_eq!(roles_of_user(&store, "karim").await.unwrap(), vec!["Manager"]);

        remove(&store, "karim", "Manager").await.unwrap();
        assert!(matches!(remove(&store, "karim", "Manager").await, Err(AppError::BadRequest(_))));
        assert!(matches!(remove(&store, "ghost", "Manager").await, Err(AppError::NotFound(_))));
        assert!(matches!(roles_of_user(&store, "ghost").await, Err(AppError::NotFound(_))));
    }
}
