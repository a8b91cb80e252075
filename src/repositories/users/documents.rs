//! MongoDB 문서 매핑
//!
//! 도메인 엔티티는 저장소 타입에 의존하지 않으므로, BSON 변환은 이 모듈에서 담당합니다.
//! ID는 UUID 문자열로 `_id`에 저장합니다.
//!
//! ```text
//! users                                   accounts
//! {                                       {
//!   "_id": "5b0c1b9e-…",                    "_id": "0e6f…",
//!   "username": "ada@example.com",          "provider": "google",
//!   "email": "ada@example.com",             "external_id": "110169484474386276334",
//!   "first_name": "Ada",                    "user_id": "5b0c1b9e-…",
//!   "last_name": "Lovelace",                "created_at": ISODate(…)
//!   "authorities": ["ROLE_…"],            }
//!   "last_auth_type": "GOOGLE",
//!   "created_at": ISODate(…),
//!   "updated_at": ISODate(…)
//! }
//! ```

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AuthenticationType, ProviderId};
use crate::domain::entities::{ExternalAccount, LocalUser};
use crate::domain::models::auth::Authority;
use crate::errors::{AppError, AppResult};

/// `users` 컬렉션 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    /// 값이 없으면 필드 자체를 생략 (email 부분 유니크 인덱스)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
    pub last_auth_type: AuthenticationType,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// `accounts` 컬렉션 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub provider: ProviderId,
    pub external_id: String,
    pub user_id: String,
    pub created_at: bson::DateTime,
}

pub fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

pub fn from_bson_datetime(value: bson::DateTime) -> AppResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| AppError::DatabaseError(format!("저장된 시각이 범위를 벗어났습니다: {}", value)))
}

pub fn parse_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::DatabaseError(format!("저장된 ID 형식이 올바르지 않습니다 ({}): {}", value, e)))
}

impl UserDocument {
    /// 저장된 사용자(ID 할당 완료)를 문서로 변환합니다.
    pub fn from_user(id: Uuid, user: &LocalUser) -> Self {
        Self {
            id: id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            authorities: user.authorities.iter().map(|a| a.as_str().to_string()).collect(),
            last_auth_type: user.last_auth_type,
            created_at: to_bson_datetime(user.created_at),
            updated_at: to_bson_datetime(user.updated_at),
        }
    }

    /// 연결 계정을 붙여 엔티티로 변환합니다.
    pub fn into_user(self, accounts: Vec<ExternalAccount>) -> AppResult<LocalUser> {
        Ok(LocalUser {
            id: Some(parse_id(&self.id)?),
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            authorities: self.authorities.into_iter().map(Authority::new).collect(),
            accounts,
            last_auth_type: self.last_auth_type,
            created_at: from_bson_datetime(self.created_at)?,
            updated_at: from_bson_datetime(self.updated_at)?,
        })
    }
}

impl AccountDocument {
    pub fn from_account(id: Uuid, account: &ExternalAccount) -> Self {
        Self {
            id: id.to_string(),
            provider: account.provider,
            external_id: account.external_id.clone(),
            user_id: account.user_id.to_string(),
            created_at: to_bson_datetime(account.created_at),
        }
    }

    pub fn into_account(self) -> AppResult<ExternalAccount> {
        Ok(ExternalAccount {
            id: Some(parse_id(&self.id)?),
            provider: self.provider,
            external_id: self.external_id,
            user_id: parse_id(&self.user_id)?,
            created_at: from_bson_datetime(self.created_at)?,
        })
    }
}
