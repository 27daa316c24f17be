use anyhow::Result;
use contracts::system::auth::RegisterRequest;

use crate::shared::config::BootstrapConfig;
use crate::system::auth::{DEFAULT_ROLES, ROLE_ADMIN, ROLE_SUPER_USER};
use crate::system::users::service;
use crate::system::users::store::IdentityStore;

/// Создаёт недостающие системные роли
pub async fn ensure_default_roles(store: &dyn IdentityStore) -> Result<()> {
    for role in DEFAULT_ROLES {
        if !store.role_exists(role).await? {
            store.create_role(role).await?;
            tracing::info!("Role '{}' created", role);
        }
    }
    Ok(())
}

/// Создаёт администратора, если пользователей ещё нет
pub async fn ensure_admin_user_exists(store: &dyn IdentityStore, bootstrap: &BootstrapConfig) -> Result<()> {
    if store.count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");

    let request = RegisterRequest {
        username: bootstrap.admin_username.clone(),
        email: bootstrap.admin_email.clone(),
        password: bootstrap.admin_password.clone(),
        first_name: Some("Administrator".to_string()),
        last_name: None,
    };
    let admin = service::create(store, request, true)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot create default admin: {}", e))?;

    store.add_to_role(&admin.id, ROLE_ADMIN).await?;
    store.add_to_role(&admin.id, ROLE_SUPER_USER).await?;

    tracing::warn!(
        "Default admin user '{}' created (id {}). Change its password immediately!",
        admin.username,
        admin.id
    );

    Ok(())
}
