//! # OAuth / OIDC Domain Models
//!
//! 외부 프로바이더 인증 결과를 표현하는 도메인 모델입니다.
//!
//! ## 구성 요소
//!
//! - **`raw_profile`**: 프로토콜 라이브러리가 넘겨주는 검증된 원본 속성 (`RawProfile`)
//! - **`canonical_claims`**: 계정 연동에 쓰는 정규화 결과 (`CanonicalClaims`)
//!
//! ```text
//! RawProfile ──(ClaimNormalizer)──► CanonicalClaims ──(AccountResolver)──► LocalUser
//! ```

pub mod raw_profile;
pub mod canonical_claims;

pub use raw_profile::{ProfileAttributes, ProfileFlow, RawProfile};
pub use canonical_claims::{CanonicalClaims, PersonName};
