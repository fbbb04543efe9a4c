pub mod app_config;
pub mod redis_repo;
pub mod backend;

pub use redis_repo::RedisStore;
pub use backend::{BackendClient, BackendError};
