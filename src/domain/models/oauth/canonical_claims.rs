//! 정규화된 신원 클레임
//!
//! 프로바이더별 프로필 모양과 무관하게 계정 연동에 필요한 필드만 담습니다.

use serde::{Deserialize, Serialize};

use crate::config::ProviderId;

/// 이름/성 쌍
///
/// 값이 없는 쪽은 빈 문자열입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

impl PersonName {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
        }
    }

    /// 전체 이름을 첫 번째 공백에서 나눕니다.
    ///
    /// 공백이 없으면 전체 값이 성(family)이 되고 이름(given)은 비어 있습니다.
    ///
    /// ```rust,ignore
    /// assert_eq!(PersonName::split_full_name("Ada Lovelace"), PersonName::new("Ada", "Lovelace"));
    /// assert_eq!(PersonName::split_full_name("Prince"), PersonName::new("", "Prince"));
    /// ```
    pub fn split_full_name(full_name: &str) -> Self {
        match full_name.split_once(' ') {
            Some((given, family)) => Self::new(given, family),
            None => Self::new("", full_name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.given.is_empty() && self.family.is_empty()
    }
}

/// 정규화된 클레임
///
/// `external_id`는 프로바이더의 안정적인 subject/user id이며, 이메일이 아닙니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalClaims {
    pub provider: ProviderId,
    pub external_id: String,
    pub email: Option<String>,
    pub names: Option<PersonName>,
}

impl CanonicalClaims {
    /// 로컬 사용자명으로 쓸 값: 이메일, 없으면 외부 ID
    pub fn preferred_username(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.external_id)
    }
}
