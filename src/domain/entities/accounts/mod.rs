//! Accounts Entity Module
//!
//! 프로바이더 신원과 로컬 사용자 사이의 연결 레코드(`ExternalAccount`)를 정의합니다.

pub mod external_account;

pub use external_account::ExternalAccount;
