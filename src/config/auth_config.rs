//! # Authentication Configuration Module
//!
//! 외부 인증 프로바이더 식별자와 계정 연동 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 `oauth2.client.registration.*` 설정과 유사한 역할을 수행합니다.
//!
//! ## 지원하는 프로바이더
//!
//! | registration id | 프로토콜 | 외부 식별자 |
//! |-----------------|----------|-------------|
//! | `google` | OIDC | `sub` 클레임 |
//! | `github` | OAuth 2.0 | 숫자 `id` 속성 |
//!
//! ## 환경 변수
//!
//! ```bash
//! # 허용할 프로바이더 (쉼표 구분, 기본값: 전체)
//! export ENABLED_PROVIDERS="google,github"
//!
//! # 최초 로그인 사용자에게 부여할 역할 코드
//! export DEFAULT_ROLE_CODE="system-full-access"
//!
//! # 프로토콜 게이트웨이가 resolve API 호출 시 제시할 토큰
//! export IDENTITY_GATEWAY_TOKEN="change-me"
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// 외부 인증 프로바이더 식별자
///
/// 닫힌 집합입니다. 새로운 프로바이더는 변형을 추가하는 방식으로만 확장합니다.
/// 연동 계정([`ExternalAccount`](crate::domain::entities::accounts::external_account::ExternalAccount))의
/// 구분자로 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Google (OIDC)
    Google,
    /// GitHub (일반 OAuth 2.0)
    GitHub,
}

impl ProviderId {
    /// 인식 가능한 모든 프로바이더
    pub const ALL: [ProviderId; 2] = [ProviderId::Google, ProviderId::GitHub];

    /// 클라이언트 registration id 문자열 표현
    ///
    /// ```rust,ignore
    /// assert_eq!(ProviderId::GitHub.as_str(), "github");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::GitHub => "github",
        }
    }
}

impl FromStr for ProviderId {
    type Err = AppError;

    /// registration id를 프로바이더로 변환합니다.
    ///
    /// 매핑은 정확히 일치하는 경우에만 성공하며, 그 외에는
    /// `AppError::UnknownAuthProvider`로 실패합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| AppError::UnknownAuthProvider(s.to_string()))
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자가 마지막으로 인증한 방식
///
/// `App`은 애플리케이션 자체 자격 증명을 의미하며,
/// 외부 프로바이더 로그인 시에는 해당 프로바이더 값으로 갱신됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthenticationType {
    App,
    Google,
    GitHub,
}

impl AuthenticationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationType::App => "APP",
            AuthenticationType::Google => "GOOGLE",
            AuthenticationType::GitHub => "GITHUB",
        }
    }
}

impl From<ProviderId> for AuthenticationType {
    fn from(provider: ProviderId) -> Self {
        match provider {
            ProviderId::Google => AuthenticationType::Google,
            ProviderId::GitHub => AuthenticationType::GitHub,
        }
    }
}

/// 계정 연동(Identity Federation) 설정을 관리하는 구조체
///
/// 모든 값은 환경 변수에서 읽으며, 개발 환경에서 안전한 기본값을 제공합니다.
pub struct IdentityConfig;

impl IdentityConfig {
    /// 기본 권한 역할 코드
    ///
    /// 최초 생성된 사용자에게 부여되는 전체 접근 역할입니다.
    ///
    /// # 기본값
    ///
    /// `system-full-access`
    pub fn default_role_code() -> String {
        env::var("DEFAULT_ROLE_CODE")
            .ok()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or_else(|| "system-full-access".to_string())
    }

    /// 로그인을 허용할 프로바이더 목록
    ///
    /// `ENABLED_PROVIDERS`가 없으면 인식 가능한 모든 프로바이더를 허용합니다.
    /// 목록에 알 수 없는 이름이 있으면 경고를 남기고 무시합니다.
    pub fn enabled_providers() -> Vec<ProviderId> {
        match env::var("ENABLED_PROVIDERS") {
            Ok(raw) => Self::parse_provider_list(&raw),
            Err(_) => ProviderId::ALL.to_vec(),
        }
    }

    /// 쉼표로 구분된 프로바이더 목록을 파싱합니다.
    pub fn parse_provider_list(raw: &str) -> Vec<ProviderId> {
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| match name.parse::<ProviderId>() {
                Ok(provider) => Some(provider),
                Err(_) => {
                    log::warn!("ENABLED_PROVIDERS 에 알 수 없는 프로바이더가 있습니다: {}", name);
                    None
                }
            })
            .collect()
    }

    /// 프로토콜 게이트웨이 공유 토큰
    ///
    /// resolve API는 토큰 검증을 마친 신뢰된 게이트웨이만 호출할 수 있어야 합니다.
    /// 값이 설정되지 않으면 `None`을 반환하며, 이 경우 게이트웨이 미들웨어는 모든 요청을 거부합니다.
    pub fn gateway_token() -> Option<String> {
        env::var("IDENTITY_GATEWAY_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_registration_id() {
        assert_eq!("google".parse::<ProviderId>().unwrap(), ProviderId::Google);
        assert_eq!("github".parse::<ProviderId>().unwrap(), ProviderId::GitHub);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        for id in ["twitter", "", "GOOGLE", " github"] {
            match id.parse::<ProviderId>() {
                Err(AppError::UnknownAuthProvider(name)) => assert_eq!(name, id),
                other => panic!("expected UnknownAuthProvider for {:?}, got {:?}", id, other),
            }
        }
    }

    #[test]
    fn test_provider_serialization() {
        let json = serde_json::to_string(&ProviderId::GitHub).unwrap();
        assert_eq!(json, "\"github\"");

        let provider: ProviderId = serde_json::from_str("\"google\"").unwrap();
        assert_eq!(provider, ProviderId::Google);
    }

    #[test]
    fn test_authentication_type_from_provider() {
        assert_eq!(AuthenticationType::from(ProviderId::Google), AuthenticationType::Google);
        assert_eq!(AuthenticationType::from(ProviderId::GitHub).as_str(), "GITHUB");
        assert_eq!(serde_json::to_string(&AuthenticationType::App).unwrap(), "\"APP\"");
    }

    #[test]
    fn test_parse_provider_list() {
        assert_eq!(
            IdentityConfig::parse_provider_list("google, github"),
            vec![ProviderId::Google, ProviderId::GitHub]
        );
        assert_eq!(
            IdentityConfig::parse_provider_list("github,,facebook"),
            vec![ProviderId::GitHub]
        );
        assert!(IdentityConfig::parse_provider_list("").is_empty());
    }
}
