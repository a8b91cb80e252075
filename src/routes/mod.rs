//! 라우트 설정 모듈
//!
//! 기능별 핸들러를 URL 스코프에 등록합니다.
//!
//! # Route Map
//!
//! | Method | Path | 보호 |
//! |--------|------|------|
//! | GET | `/health` | 없음 |
//! | POST | `/api/v1/identity/resolve` | 게이트웨이 토큰 |
//! | GET | `/api/v1/users` | 게이트웨이 토큰 |
//! | GET | `/api/v1/users/{id}` | 게이트웨이 토큰 |

use crate::config::IdentityConfig;
use crate::handlers;
use crate::middlewares::GatewayAuth;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_api_routes(cfg, IdentityConfig::gateway_token());
}

/// `/api/v1` 아래 라우트를 설정합니다
///
/// 전체 스코프가 [`GatewayAuth`]로 보호됩니다.
///
/// ```bash
/// curl http://localhost:8080/api/v1/users \
///   -H "X-Gateway-Token: $IDENTITY_GATEWAY_TOKEN"
/// ```
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, gateway_token: Option<String>) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(GatewayAuth::new(gateway_token))
            .service(
                web::scope("/identity")
                    .service(handlers::identity::resolve_identity)
            )
            .service(
                web::scope("/users")
                    .service(handlers::users::list_users)
                    .service(handlers::users::get_user)
            )
    );
}

/// 서버 상태를 확인하는 헬스체크 엔드포인트
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "social_login_backend",
///   "version": "0.1.0",
///   "timestamp": "2026-01-15T10:30:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use crate::config::ProviderId;
    use crate::middlewares::GATEWAY_TOKEN_HEADER;
    use crate::repositories::MemoryIdentityStore;
    use crate::services::identity::RoleAuthorityGrants;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::with_providers(
            Arc::new(MemoryIdentityStore::new()),
            Arc::new(RoleAuthorityGrants::new("system-full-access")),
            ProviderId::ALL.to_vec(),
        ))
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_api_requires_gateway_token() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .configure(|cfg| configure_api_routes(cfg, Some("gateway-secret".to_string()))),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header((GATEWAY_TOKEN_HEADER, "gateway-secret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_resolve_twice_through_gateway_links_once() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .configure(|cfg| configure_api_routes(cfg, Some("gateway-secret".to_string()))),
        )
        .await;

        let payload = json!({
            "registration_id": "github",
            "flow": "oauth2",
            "attributes": { "id": 583231, "name": "The Octocat", "email": "octo@example.com" }
        });

        let mut ids = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/v1/identity/resolve")
                .insert_header((GATEWAY_TOKEN_HEADER, "gateway-secret"))
                .set_json(&payload)
                .to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["accounts"].as_array().map(Vec::len), Some(1));
            ids.push(body["id"].clone());
        }

        assert_eq!(ids[0], ids[1]);
    }
}
