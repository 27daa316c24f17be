pub mod auth;
pub mod roles;
pub mod test;
pub mod users;
