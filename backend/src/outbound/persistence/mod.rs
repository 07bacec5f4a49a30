//! PostgreSQL persistence adapters built on Diesel.

mod diesel_domain_repository;
mod diesel_user_directory;
mod models;
mod pool;
pub mod schema;

pub use diesel_domain_repository::DieselDomainRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};
