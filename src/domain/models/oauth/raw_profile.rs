//! # 프로바이더 원본 프로필
//!
//! 프로토콜 라이브러리가 토큰 검증을 마친 뒤 넘겨주는 속성/클레임 묶음입니다.
//! 모양은 프로바이더와 플로우(OIDC / 일반 OAuth 2.0)에 따라 다르므로
//! 문자열 키와 임의 JSON 값의 맵으로만 다룹니다.
//!
//! ```text
//! OIDC (Google)                         OAuth 2.0 (GitHub)
//! {                                     {
//!   "sub": "110169484474386276334",       "id": 583231,
//!   "email": "ada@example.com",           "login": "octocat",
//!   "given_name": "Ada",                  "name": "The Octocat",
//!   "family_name": "Lovelace"             "email": null
//! }                                     }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 검증된 속성 맵
pub type ProfileAttributes = Map<String, Value>;

/// 프로필을 얻은 인증 플로우
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileFlow {
    /// OpenID Connect: ID 토큰 / UserInfo 클레임
    Oidc,
    /// 일반 OAuth 2.0: user-info 엔드포인트 속성
    OAuth2,
}

/// 플로우별로 구분된 원본 프로필
#[derive(Debug, Clone, PartialEq)]
pub enum RawProfile {
    Oidc(ProfileAttributes),
    OAuth2(ProfileAttributes),
}

impl RawProfile {
    pub fn new(flow: ProfileFlow, attributes: ProfileAttributes) -> Self {
        match flow {
            ProfileFlow::Oidc => RawProfile::Oidc(attributes),
            ProfileFlow::OAuth2 => RawProfile::OAuth2(attributes),
        }
    }

    pub fn flow(&self) -> ProfileFlow {
        match self {
            RawProfile::Oidc(_) => ProfileFlow::Oidc,
            RawProfile::OAuth2(_) => ProfileFlow::OAuth2,
        }
    }

    pub fn attributes(&self) -> &ProfileAttributes {
        match self {
            RawProfile::Oidc(attributes) | RawProfile::OAuth2(attributes) => attributes,
        }
    }

    /// 문자열 속성을 반환합니다. 값이 없거나 문자열이 아니면 `None`.
    pub fn string_attribute(&self, key: &str) -> Option<&str> {
        self.attributes().get(key).and_then(Value::as_str)
    }
}
