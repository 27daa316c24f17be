pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

/// Роли, которые создаются при старте
pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_SUPER_USER: &str = "super-user";
pub const ROLE_MANAGER: &str = "Manager";

pub const DEFAULT_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_SUPER_USER, ROLE_MANAGER];
