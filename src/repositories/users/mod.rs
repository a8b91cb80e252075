//! MongoDB 저장소 구현

pub mod documents;
pub mod user_repo;

pub use user_repo::{MongoIdentityStore, MongoTransaction};
