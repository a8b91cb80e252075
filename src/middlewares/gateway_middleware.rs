//! 게이트웨이 인증 미들웨어
//!
//! 신원 해석 API는 토큰 검증을 마친 프로토콜 게이트웨이만 호출해야 합니다.
//! 이 미들웨어는 `X-Gateway-Token` 헤더가 설정된 공유 토큰과 같은지 확인합니다.
//!
//! 토큰이 설정되지 않은 경우(`IDENTITY_GATEWAY_TOKEN` 없음) 모든 요청을 거부합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::config::IdentityConfig;
use crate::middlewares::gateway_inner::GatewayAuthService;

/// 게이트웨이 토큰 헤더 이름
pub const GATEWAY_TOKEN_HEADER: &str = "X-Gateway-Token";

pub struct GatewayAuth {
    expected_token: Option<Rc<str>>,
}

impl GatewayAuth {
    pub fn new(expected_token: Option<String>) -> Self {
        Self {
            expected_token: expected_token
                .filter(|token| !token.is_empty())
                .map(Rc::from),
        }
    }

    /// `IDENTITY_GATEWAY_TOKEN` 환경 변수를 사용합니다.
    pub fn from_env() -> Self {
        Self::new(IdentityConfig::gateway_token())
    }
}

impl<S, B> Transform<S, ServiceRequest> for GatewayAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = GatewayAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GatewayAuthService {
            service: Rc::new(service),
            expected_token: self.expected_token.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_valid_token_passes() {
        let app = test::init_service(
            App::new()
                .wrap(GatewayAuth::new(Some("secret".to_string())))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((GATEWAY_TOKEN_HEADER, "secret"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_or_wrong_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(GatewayAuth::new(Some("secret".to_string())))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((GATEWAY_TOKEN_HEADER, "secreT"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Authentication error: 유효한 게이트웨이 토큰이 필요합니다");
    }

    #[actix_web::test]
    async fn test_unconfigured_token_rejects_everything() {
        let app = test::init_service(
            App::new()
                .wrap(GatewayAuth::new(None))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((GATEWAY_TOKEN_HEADER, ""))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
