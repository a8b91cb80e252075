//! 공유 애플리케이션 상태
//!
//! 핸들러는 `web::Data<AppState>`로 서비스에 접근합니다.
//! 저장소와 권한 생성기는 `main`에서 한 번 만들어 주입합니다.

use std::sync::Arc;

use crate::config::ProviderId;
use crate::repositories::IdentityStore;
use crate::services::identity::{AuthorityGrants, IdentityService};

/// Shared application state
pub struct AppState {
    /// 신원 해석 파이프라인과 사용자 조회
    pub identity_service: Arc<IdentityService>,
}

impl AppState {
    pub fn new(identity_service: IdentityService) -> Self {
        Self {
            identity_service: Arc::new(identity_service),
        }
    }

    /// 환경 설정(`ENABLED_PROVIDERS`)으로 상태를 구성합니다.
    pub fn from_config(store: Arc<dyn IdentityStore>, grants: Arc<dyn AuthorityGrants>) -> Self {
        Self::new(IdentityService::from_config(store, grants))
    }

    pub fn with_providers(
        store: Arc<dyn IdentityStore>,
        grants: Arc<dyn AuthorityGrants>,
        enabled_providers: Vec<ProviderId>,
    ) -> Self {
        Self::new(IdentityService::new(store, grants, enabled_providers))
    }
}
