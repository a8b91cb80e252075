//! 기본 권한 부여
//!
//! 역할/권한 저장소는 이 서비스의 범위 밖이므로, 새 사용자에게 줄 권한 토큰은
//! [`AuthorityGrants`] 구현체가 만들어 줍니다.

use crate::config::IdentityConfig;
use crate::domain::models::auth::Authority;

/// 권한 토큰 생성기
pub trait AuthorityGrants: Send + Sync {
    /// 최초 생성된 사용자에게 부여할 기본 권한
    fn default_grant(&self) -> Authority;
}

/// 설정된 리소스 역할(`ROLE_<code>`)을 부여하는 기본 구현
#[derive(Debug, Clone)]
pub struct RoleAuthorityGrants {
    role_code: String,
}

impl RoleAuthorityGrants {
    pub fn new(role_code: impl Into<String>) -> Self {
        Self {
            role_code: role_code.into(),
        }
    }

    /// `DEFAULT_ROLE_CODE` 환경 변수에서 역할 코드를 읽습니다.
    pub fn from_env() -> Self {
        Self::new(IdentityConfig::default_role_code())
    }

    pub fn role_code(&self) -> &str {
        &self.role_code
    }
}

impl AuthorityGrants for RoleAuthorityGrants {
    fn default_grant(&self) -> Authority {
        Authority::resource_role(&self.role_code)
    }
}
