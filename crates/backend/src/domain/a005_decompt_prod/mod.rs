pub mod fields;
pub mod repository;
pub mod service;
