use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{AuthenticationType, ProviderId};
use crate::domain::entities::accounts::ExternalAccount;
use crate::domain::entities::users::LocalUser;

/// 연결 계정 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedAccountResponse {
    pub id: String,
    pub provider: ProviderId,
    pub external_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<ExternalAccount> for LinkedAccountResponse {
    fn from(account: ExternalAccount) -> Self {
        Self {
            id: account.id.map(|id| id.to_string()).unwrap_or_default(),
            provider: account.provider,
            external_id: account.external_id,
            created_at: account.created_at,
        }
    }
}

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// 권한 목록 (예: "ROLE_system-full-access")
    pub authorities: Vec<String>,

    /// 연결된 외부 계정
    pub accounts: Vec<LinkedAccountResponse>,

    pub last_auth_type: AuthenticationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LocalUser> for UserResponse {
    fn from(user: LocalUser) -> Self {
        let LocalUser {
            id,
            username,
            email,
            first_name,
            last_name,
            authorities,
            accounts,
            last_auth_type,
            created_at,
            updated_at,
        } = user;

        Self {
            id: id.map(|id| id.to_string()).unwrap_or_default(),
            username,
            email,
            first_name,
            last_name,
            authorities: authorities.into_iter().map(|a| a.to_string()).collect(),
            accounts: accounts.into_iter().map(LinkedAccountResponse::from).collect(),
            last_auth_type,
            created_at,
            updated_at,
        }
    }
}

/// 사용자 목록 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

impl From<Vec<LocalUser>> for UserListResponse {
    fn from(users: Vec<LocalUser>) -> Self {
        let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
        Self {
            total: users.len(),
            users,
        }
    }
}
