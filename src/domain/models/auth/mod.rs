//! 권한 관련 도메인 모델

pub mod authority;

pub use authority::Authority;
