//! External Account Entity
//!
//! 외부 프로바이더 신원과 로컬 사용자 사이의 연결 레코드입니다.
//! 처음 로그인할 때 한 번 만들어지고 이후 수정/삭제되지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ProviderId;

/// 연결된 외부 계정
///
/// `(provider, external_id)` 쌍은 저장소 전체에서 유일합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAccount {
    pub id: Option<Uuid>,
    pub provider: ProviderId,
    /// 프로바이더의 subject / user id
    pub external_id: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ExternalAccount {
    pub fn new(provider: ProviderId, external_id: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            id: None,
            provider,
            external_id: external_id.into(),
            user_id,
            created_at: Utc::now(),
        }
    }

    /// 같은 외부 신원인지 확인
    pub fn matches(&self, provider: ProviderId, external_id: &str) -> bool {
        self.provider == provider && self.external_id == external_id
    }
}
