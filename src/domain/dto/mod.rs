//! # Data Transfer Objects Module
//!
//! HTTP API의 요청/응답 계약을 정의합니다.
//! 엔티티를 그대로 노출하지 않고, 응답에 필요한 필드만 문자열/열거형으로 변환합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! └── identity/
//!     ├── request/    # 게이트웨이 → 서버
//!     └── response/   # 서버 → 게이트웨이 / 운영 도구
//! ```
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use actix_web::{web, HttpResponse};
//! use validator::Validate;
//!
//! pub async fn resolve_identity(
//!     state: web::Data<AppState>,
//!     payload: web::Json<ResolveIdentityRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let request = payload.into_inner();
//!     request
//!         .validate()
//!         .map_err(|_| AppError::UnknownAuthProvider(request.registration_id.clone()))?;
//!
//!     let (registration_id, profile) = request.into_raw_profile();
//!     let user = state.identity_service.resolve(&registration_id, profile).await?;
//!
//!     Ok(HttpResponse::Ok().json(UserResponse::from(user)))
//! }
//! ```

pub mod identity;

pub use identity::*;
