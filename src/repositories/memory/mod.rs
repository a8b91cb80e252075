//! 메모리 저장소 구현

pub mod memory_store;

pub use memory_store::{MemoryIdentityStore, MemoryTransaction};
