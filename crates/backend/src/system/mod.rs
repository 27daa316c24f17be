pub mod auth;
pub mod handlers;
pub mod initialization;
pub mod middleware;
pub mod roles;
pub mod tracing;
pub mod users;
