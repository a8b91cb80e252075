//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 소셜 로그인 백엔드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 계정 연동 에러 분류
//!
//! | 에러 | 원인 | HTTP |
//! |------|------|------|
//! | `UnknownAuthProvider` | 등록되지 않았거나 비활성화된 프로바이더 | 401 |
//! | `MalformedProfile` | 필수 클레임이 빠진 프로필 | 401 |
//! | `InconsistentState` | 저장소 유일성 제약 위반 (동시 쓰기 경합) | 500 |
//!
//! 세 에러 모두 코어 내부에서 재시도하지 않습니다. 재시도는 호출자(사용자의 재로그인)의 몫입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! fn provider_of(registration_id: &str) -> Result<ProviderId, AppError> {
//!     registration_id.parse::<ProviderId>()
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 알 수 없는 OAuth2/OIDC 프로바이더 (401 Unauthorized)
    ///
    /// 프로토콜 계층이 전달한 registration id가 [`ProviderId`](crate::config::ProviderId)
    /// 어느 것과도 매핑되지 않는 경우입니다. 설정/신뢰 오류이므로 인증 시도를 즉시 중단합니다.
    #[error("Unknown OAuth2 provider: {0}")]
    UnknownAuthProvider(String),

    /// 프로바이더 프로필에 필수 필드가 없음 (401 Unauthorized)
    #[error("Malformed provider profile: {0}")]
    MalformedProfile(String),

    /// 저장소 불변식 위반 (500 Internal Server Error)
    ///
    /// 사용자명/이메일 또는 (프로바이더, 외부 ID) 유일성이 동시 쓰기로 깨진 경우입니다.
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_)
            | AppError::UnknownAuthProvider(_)
            | AppError::MalformedProfile(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
