//! # Domain Layer Module
//!
//! 계정 연동의 도메인 타입을 담는 계층입니다.
//! 저장소나 HTTP 프레임워크에 의존하지 않습니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 영속 객체 (LocalUser, ExternalAccount)
//! ├── Models    - 프로바이더 프로필, 정규화 클레임, 권한 토큰
//! └── DTOs      - HTTP 요청/응답 계약
//!      │
//!      ▼
//! Application Layer (services::identity)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db)
//! ```
//!
//! ## 모듈 구성
//!
//! ### [`entities`] - 핵심 도메인 엔티티
//!
//! - `LocalUser`: 유일한 사용자명, 선택적 이메일, 권한, 연결 계정
//! - `ExternalAccount`: `(provider, external_id)` → 로컬 사용자 연결
//!
//! ### [`models`] - 값 객체
//!
//! - `RawProfile`: OIDC / OAuth 2.0 플로우별 원본 속성
//! - `CanonicalClaims`: 정규화된 `(provider, external_id, email, names)`
//! - `Authority`: 불투명한 권한 토큰 (`ROLE_<code>`)
//!
//! ### [`dto`] - 데이터 전송 객체
//!
//! - `ResolveIdentityRequest`: 게이트웨이가 보내는 검증된 프로필
//! - `UserResponse`, `UserListResponse`: 사용자 조회 응답
//!
//! ## 데이터 흐름
//!
//! ```text
//! ResolveIdentityRequest
//!     │ into_raw_profile()
//!     ▼
//! (registration_id, RawProfile)
//!     │ ProviderId::from_str + ClaimNormalizer
//!     ▼
//! CanonicalClaims
//!     │ AccountResolver (단일 트랜잭션)
//!     ▼
//! LocalUser ──► UserResponse
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
