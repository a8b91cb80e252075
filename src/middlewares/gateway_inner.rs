//! GatewayAuth 토큰 검증 로직
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::errors::AppError;
use crate::middlewares::gateway_middleware::GATEWAY_TOKEN_HEADER;

/// 실제 토큰 검증을 수행하는 서비스
pub struct GatewayAuthService<S> {
    pub service: Rc<S>,
    pub expected_token: Option<Rc<str>>,
}

impl<S, B> Service<ServiceRequest> for GatewayAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let presented = req
            .headers()
            .get(GATEWAY_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok());

        let authorized = match (&self.expected_token, presented) {
            (Some(expected), Some(presented)) => constant_time_eq(expected.as_bytes(), presented.as_bytes()),
            (None, _) => {
                log::error!("IDENTITY_GATEWAY_TOKEN 이 설정되지 않아 요청을 거부합니다");
                false
            }
            _ => false,
        };

        Box::pin(async move {
            if !authorized {
                log::warn!("게이트웨이 인증 실패: {} {}", req.method(), req.path());
                let response = AppError::AuthenticationError(
                    "유효한 게이트웨이 토큰이 필요합니다".to_string(),
                )
                .error_response();
                let (req, _) = req.into_parts();
                let res = ServiceResponse::new(req, response)
                    .map_into_right_body();
                return Ok(res);
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 길이가 같으면 내용과 무관하게 같은 시간이 걸리는 비교
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
