//! # Domain Entities Module
//!
//! 저장소에 영속되는 핵심 엔티티들을 정의합니다.
//!
//! ## 구성
//!
//! ```text
//! LocalUser (users)
//!   ├── authorities: Vec<Authority>     최초 생성 시 한 번 부여
//!   └── accounts: Vec<ExternalAccount>  프로바이더당 최대 하나
//!                     │
//!                     └── (provider, external_id) 전역 유일
//! ```
//!
//! ## 엔티티 설계 원칙
//!
//! - **저장소 독립**: 엔티티는 특정 저장소 타입(BSON 등)에 의존하지 않습니다.
//!   MongoDB 문서 매핑은 `repositories::users::documents`에서 담당합니다.
//! - **ID 할당**: `id`는 첫 저장 시 저장소가 채웁니다 (`Option<Uuid>`).
//! - **불변 연결**: `ExternalAccount`는 생성 이후 수정되지 않습니다.

pub mod users;
pub mod accounts;

pub use users::LocalUser;
pub use accounts::ExternalAccount;
