//! 사용자 조회 HTTP 핸들러
//!
//! 운영 도구와 게이트웨이가 연결 상태를 확인할 때 사용합니다.

use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;
use crate::domain::dto::identity::{UserListResponse, UserResponse};
use crate::errors::AppError;

/// 전체 사용자와 연결 계정 목록
#[get("")]
pub async fn list_users(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = state.identity_service.list_users().await?;

    Ok(HttpResponse::Ok().json(UserListResponse::from(users)))
}

#[get("/{user_id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = state.identity_service.get_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
