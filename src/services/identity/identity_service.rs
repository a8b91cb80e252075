//! # Identity Service
//!
//! 외부 인증 성공 후 한 번 호출되는 해석 파이프라인입니다.
//!
//! ```text
//! registration_id ──► ProviderId (알 수 없거나 비활성 → UnknownAuthProvider)
//! RawProfile      ──► ClaimNormalizer ──► CanonicalClaims
//!                                              │
//!                                              ▼
//!                                     AccountResolver (트랜잭션)
//!                                              │
//!                                              ▼
//!                                          LocalUser
//! ```
//!
//! 저장소와 권한 생성기는 생성자에서 명시적으로 주입받습니다.

use std::sync::Arc;

use log::{debug, warn};
use uuid::Uuid;

use crate::config::{IdentityConfig, ProviderId};
use crate::domain::entities::LocalUser;
use crate::domain::models::oauth::RawProfile;
use crate::errors::{AppError, AppResult};
use crate::repositories::IdentityStore;
use crate::services::identity::account_resolver::AccountResolver;
use crate::services::identity::authority_grants::AuthorityGrants;
use crate::services::identity::claim_normalizer::ClaimNormalizer;

pub struct IdentityService {
    store: Arc<dyn IdentityStore>,
    resolver: AccountResolver,
    enabled_providers: Vec<ProviderId>,
}

impl IdentityService {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        grants: Arc<dyn AuthorityGrants>,
        enabled_providers: Vec<ProviderId>,
    ) -> Self {
        Self {
            resolver: AccountResolver::new(Arc::clone(&store), grants),
            store,
            enabled_providers,
        }
    }

    /// `ENABLED_PROVIDERS` 설정을 사용합니다.
    pub fn from_config(store: Arc<dyn IdentityStore>, grants: Arc<dyn AuthorityGrants>) -> Self {
        Self::new(store, grants, IdentityConfig::enabled_providers())
    }

    pub fn enabled_providers(&self) -> &[ProviderId] {
        &self.enabled_providers
    }

    /// 등록 ID를 활성화된 프로바이더로 변환합니다.
    pub fn provider_for(&self, registration_id: &str) -> AppResult<ProviderId> {
        let provider = registration_id.parse::<ProviderId>()?;

        if !self.enabled_providers.contains(&provider) {
            return Err(AppError::UnknownAuthProvider(registration_id.to_string()));
        }

        Ok(provider)
    }

    /// 검증된 프로필을 로컬 사용자로 해석합니다.
    ///
    /// # Errors
    ///
    /// - `UnknownAuthProvider`: 등록 ID를 모르거나 비활성화된 프로바이더 (저장소 접근 없음)
    /// - `MalformedProfile`: 필수 속성이 없는 프로필 (저장소 접근 없음)
    /// - `InconsistentState`: 저장된 데이터와 충돌 (롤백됨)
    pub async fn resolve(&self, registration_id: &str, profile: RawProfile) -> AppResult<LocalUser> {
        let provider = self
            .provider_for(registration_id)
            .inspect_err(|e| warn!("⚠️ 로그인 거부: {}", e))?;

        let claims = ClaimNormalizer::normalize(provider, &profile)
            .inspect_err(|e| warn!("⚠️ {} 프로필 정규화 실패: {}", provider, e))?;

        debug!("정규화 완료: {} {}", claims.provider, claims.external_id);
        self.resolver.resolve(claims).await
    }

    /// ID 문자열로 사용자를 조회합니다.
    pub async fn get_user(&self, id: &str) -> AppResult<LocalUser> {
        let id = Uuid::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)))
    }

    pub async fn list_users(&self) -> AppResult<Vec<LocalUser>> {
        self.store.list_users().await
    }
}
