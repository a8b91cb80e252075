//! Users Entity Module
//!
//! 외부 프로바이더 계정이 연결되는 로컬 사용자 엔티티를 정의합니다.
//!
//! # 주요 구성 요소
//!
//! ### LocalUser Entity
//! - **다중 프로바이더 연결**: Google, GitHub 계정을 한 사용자에 연결
//! - **기본 권한**: 최초 생성 시 한 번만 부여
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::LocalUser;
//!
//! let mut user = LocalUser::new("ada@example.com", Some("ada@example.com".to_string()));
//! user.apply_names(&PersonName::new("Ada", "Lovelace"));
//! ```

pub mod user;

pub use user::LocalUser;
