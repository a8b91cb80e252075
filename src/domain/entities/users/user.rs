//! Local User Entity
//!
//! 외부 프로바이더 계정이 연결되는 로컬 사용자 엔티티입니다.
//! 한 사용자는 프로바이더당 하나의 외부 계정을 가질 수 있으며,
//! 여러 프로바이더 계정이 같은 사용자에 연결될 수 있습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AuthenticationType, ProviderId};
use crate::domain::entities::accounts::ExternalAccount;
use crate::domain::models::auth::Authority;
use crate::domain::models::oauth::PersonName;
use crate::utils::string_utils::non_empty;

/// 로컬 사용자 엔티티
///
/// - `username`은 저장소 전체에서 유일합니다.
/// - `email`은 값이 있을 때 유일합니다.
/// - `authorities`는 비어 있을 때 한 번만 채워지고 이후 덮어쓰지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalUser {
    /// 첫 저장 시 저장소가 할당
    pub id: Option<Uuid>,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub authorities: Vec<Authority>,
    /// 연결된 외부 계정
    pub accounts: Vec<ExternalAccount>,
    /// 마지막으로 사용된 인증 수단
    pub last_auth_type: AuthenticationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalUser {
    /// 아직 저장되지 않은 새 사용자
    ///
    /// 사용자명은 이메일, 없으면 호출자가 외부 ID로 채웁니다.
    pub fn new(username: impl Into<String>, email: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            username: username.into(),
            email,
            first_name: None,
            last_name: None,
            authorities: Vec::new(),
            accounts: Vec::new(),
            last_auth_type: AuthenticationType::App,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// 해당 프로바이더 계정이 연결되어 있는지 확인
    pub fn has_account_for(&self, provider: ProviderId) -> bool {
        self.account_for(provider).is_some()
    }

    pub fn account_for(&self, provider: ProviderId) -> Option<&ExternalAccount> {
        self.accounts.iter().find(|account| account.provider == provider)
    }

    /// 이름/성을 덮어씁니다. 빈 값은 `None`으로 저장합니다.
    pub fn apply_names(&mut self, names: &PersonName) {
        self.first_name = non_empty(&names.given);
        self.last_name = non_empty(&names.family);
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
