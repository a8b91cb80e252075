//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 계정 연동 저장소 포트([`identity_store`])와 그 구현체들을 제공합니다.
//!
//! # Features
//!
//! - 트랜잭션 단위로 사용자/연결 계정을 읽고 쓰는 `IdentityStore` 트레이트
//! - MongoDB 구현 (세션 트랜잭션 + 유니크 인덱스)
//! - 메모리 구현 (로컬 개발, 테스트)
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::{IdentityStore, MemoryIdentityStore};
//!
//! let store: Arc<dyn IdentityStore> = Arc::new(MemoryIdentityStore::new());
//! let users = store.list_users().await?;
//! ```

pub mod identity_store;
pub mod memory;
pub mod users;

pub use identity_store::{IdentityStore, IdentityTransaction};
pub use memory::MemoryIdentityStore;
pub use users::MongoIdentityStore;
