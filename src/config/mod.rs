//! # Configuration Module
//!
//! 소셜 로그인 백엔드의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소 백엔드 설정
//! - [`auth_config`] - 프로바이더 식별자, 기본 권한, 게이트웨이 토큰 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export STORE_BACKEND="mongodb"
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//! export IDENTITY_GATEWAY_TOKEN="change-me"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
