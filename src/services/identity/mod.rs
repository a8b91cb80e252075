//! # 계정 연동 서비스
//!
//! - [`claim_normalizer`]: 원본 프로필 → 정규화 클레임 (순수 함수)
//! - [`account_resolver`]: 정규화 클레임 → 저장된 로컬 사용자 (트랜잭션)
//! - [`authority_grants`]: 최초 생성 시 부여할 기본 권한
//! - [`identity_service`]: 등록 ID 확인부터 해석까지 묶은 파이프라인

pub mod claim_normalizer;
pub mod account_resolver;
pub mod authority_grants;
pub mod identity_service;

pub use claim_normalizer::ClaimNormalizer;
pub use account_resolver::AccountResolver;
pub use authority_grants::{AuthorityGrants, RoleAuthorityGrants};
pub use identity_service::IdentityService;
