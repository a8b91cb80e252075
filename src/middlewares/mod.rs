//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 게이트웨이 인증 미들웨어 (GatewayAuth)
//! - `X-Gateway-Token` 헤더를 공유 토큰과 비교
//! - 토큰이 없거나 다르면 401 응답
//! - 신원 해석/사용자 조회 API 전체에 적용
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::GatewayAuth;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1")
//!             .wrap(GatewayAuth::from_env())
//!             .route("/identity/resolve", web::post().to(resolve_identity))
//!     )
//!     .route("/health", web::get().to(health_check))
//! ```

pub mod gateway_middleware;
mod gateway_inner;

// 미들웨어 재export
pub use gateway_middleware::{GatewayAuth, GATEWAY_TOKEN_HEADER};
