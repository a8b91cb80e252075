//! # 신원 해석 요청 DTO 모듈
//!
//! 게이트웨이가 보내는 JSON 본문을 구조화된 타입으로 변환하고 검증합니다.
//! 등록 ID 형식 검증에 실패하면 핸들러가 `AppError::UnknownAuthProvider`(401)로 거부합니다.

pub mod resolve_request;

pub use resolve_request::ResolveIdentityRequest;
