//! 소셜 로그인 계정 연동 백엔드
//!
//! 외부 신원 프로바이더(OIDC / OAuth 2.0)의 검증된 프로필을
//! 로컬 사용자/연결 계정 모델로 연동하는 서비스입니다.
//!
//! # Features
//!
//! - **클레임 정규화**: Google(OIDC), GitHub(OAuth 2.0) 프로필을 하나의 형태로 변환
//! - **계정 해석**: 단일 트랜잭션으로 사용자 조회/생성, 계정 연결, 기본 권한 부여
//! - **다중 프로바이더 연결**: 같은 이메일의 계정은 한 사용자로 합쳐짐
//! - **MongoDB**: 세션 트랜잭션과 유니크 인덱스로 동시 로그인에도 사용자 하나 보장
//! - **게이트웨이 인증**: 공유 토큰을 가진 프로토콜 게이트웨이만 API 호출 가능
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /health, /api/v1/* (GatewayAuth)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, DTO 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← ClaimNormalizer → AccountResolver
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← IdentityStore / IdentityTransaction
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB / 메모리 │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use social_login_backend::repositories::MemoryIdentityStore;
//! use social_login_backend::services::identity::{IdentityService, RoleAuthorityGrants};
//!
//! let service = IdentityService::from_config(
//!     Arc::new(MemoryIdentityStore::new()),
//!     Arc::new(RoleAuthorityGrants::from_env()),
//! );
//!
//! let user = service.resolve("github", profile).await?;
//! assert!(!user.authorities.is_empty());
//! ```

pub mod app_state;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
