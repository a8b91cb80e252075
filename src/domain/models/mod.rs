//! # Domain Models
//!
//! 외부 시스템 통합 모델과 값 객체를 정의합니다.
//!
//! - [`oauth`] - 프로바이더 원본 프로필과 정규화 클레임
//! - [`auth`] - 권한 토큰

pub mod oauth;
pub mod auth;
