//! # Identity Data Transfer Objects Module
//!
//! 신원 해석 API와 사용자 조회 API의 요청/응답 계약을 정의합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! identity/
//! ├── request/
//! │   └── resolve_request.rs    # POST /api/v1/identity/resolve 본문
//! └── response/
//!     └── user_response.rs      # 사용자 + 연결 계정 응답
//! ```
//!
//! ## 응답 예제
//!
//! ```json
//! {
//!   "id": "5b0c1b9e-6f0a-4d8e-9f39-0d7f2c1f6a11",
//!   "username": "ada@example.com",
//!   "email": "ada@example.com",
//!   "first_name": "Ada",
//!   "last_name": "Lovelace",
//!   "authorities": ["ROLE_system-full-access"],
//!   "accounts": [
//!     { "id": "…", "provider": "google", "external_id": "110169484474386276334", "created_at": "…" }
//!   ],
//!   "last_auth_type": "GOOGLE",
//!   "created_at": "2026-01-01T00:00:00Z",
//!   "updated_at": "2026-01-15T10:30:00Z"
//! }
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
