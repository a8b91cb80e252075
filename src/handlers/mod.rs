//! HTTP 요청 핸들러
//!
//! - [`identity`]: 신원 해석 (`POST /api/v1/identity/resolve`)
//! - [`users`]: 사용자 조회 (`GET /api/v1/users`, `GET /api/v1/users/{id}`)

pub mod identity;
pub mod users;
