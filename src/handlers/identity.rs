//! 신원 해석 HTTP 핸들러
//!
//! 프로토콜 게이트웨이가 외부 인증을 마친 뒤 호출합니다.
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/identity/resolve \
//!   -H "Content-Type: application/json" \
//!   -H "X-Gateway-Token: $IDENTITY_GATEWAY_TOKEN" \
//!   -d '{"registration_id":"github","flow":"oauth2","attributes":{"id":583231,"name":"The Octocat"}}'
//! ```

use actix_web::{post, web, HttpResponse};
use log::warn;
use validator::Validate;

use crate::app_state::AppState;
use crate::domain::dto::identity::{ResolveIdentityRequest, UserResponse};
use crate::errors::AppError;

/// 검증된 프로필을 로컬 사용자로 해석합니다.
///
/// 성공하면 연결 계정과 권한이 채워진 사용자를 돌려줍니다.
/// 알 수 없는 프로바이더나 잘못된 프로필은 401, 저장소 충돌은 500입니다.
/// 형식이 잘못된 등록 ID도 알 수 없는 프로바이더로 취급합니다.
#[post("/resolve")]
pub async fn resolve_identity(
    state: web::Data<AppState>,
    payload: web::Json<ResolveIdentityRequest>,
) -> Result<HttpResponse, AppError> {
    // 등록 ID 형식 검사
    if let Err(e) = payload.validate() {
        warn!("로그인 거부 - 잘못된 등록 ID {:?}: {}", payload.registration_id, e);
        return Err(AppError::UnknownAuthProvider(payload.registration_id.clone()));
    }

    let (registration_id, profile) = payload.into_inner().into_raw_profile();
    let user = state.identity_service.resolve(&registration_id, profile).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
