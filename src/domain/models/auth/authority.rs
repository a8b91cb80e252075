//! 권한 토큰 모델
//!
//! 로컬 사용자에게 부여되는 불투명(opaque) 권한 값입니다.
//! 코어는 내용을 해석하지 않고 사용자 권한 집합에 붙이기만 합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 사용자에게 부여된 권한
///
/// 리소스 역할 권한은 `ROLE_<역할 코드>` 형태로 표현됩니다.
///
/// ```rust,ignore
/// let authority = Authority::resource_role("system-full-access");
/// assert_eq!(authority.as_str(), "ROLE_system-full-access");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub const ROLE_PREFIX: &'static str = "ROLE_";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 리소스 역할 코드로부터 권한을 생성합니다.
    pub fn resource_role(role_code: &str) -> Self {
        Self(format!("{}{}", Self::ROLE_PREFIX, role_code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 리소스 역할 권한이면 역할 코드를 반환합니다.
    pub fn role_code(&self) -> Option<&str> {
        self.0.strip_prefix(Self::ROLE_PREFIX)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_role_authority() {
        let authority = Authority::resource_role("system-full-access");

        assert_eq!(authority.as_str(), "ROLE_system-full-access");
        assert_eq!(authority.role_code(), Some("system-full-access"));
    }

    #[test]
    fn test_plain_authority_has_no_role_code() {
        assert_eq!(Authority::new("SCOPE_read").role_code(), None);
    }

    #[test]
    fn test_authority_serializes_as_plain_string() {
        let json = serde_json::to_string(&Authority::resource_role("reader")).unwrap();
        assert_eq!(json, "\"ROLE_reader\"");
    }
}
