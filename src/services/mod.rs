//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 외부 프로바이더 신원을 로컬 사용자로 연동하는 서비스들을 제공합니다.
//! 모든 의존성(저장소, 권한 생성기)은 생성자로 주입되며, 전역 레지스트리를 쓰지 않습니다.
//!
//! # Features
//!
//! - OIDC / OAuth 2.0 프로필 정규화
//! - 단일 트랜잭션 계정 해석 (사용자 생성, 계정 연결, 기본 권한)
//! - 사용자 조회
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::services::identity::{IdentityService, RoleAuthorityGrants};
//!
//! let service = IdentityService::from_config(store, Arc::new(RoleAuthorityGrants::from_env()));
//! let user = service.resolve("google", profile).await?;
//! ```

pub mod identity;
