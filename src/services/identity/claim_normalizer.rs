//! # Claim Normalizer
//!
//! 프로바이더별 원본 프로필을 하나의 정규화된 클레임으로 변환합니다.
//! I/O가 없는 순수 함수이며, 같은 입력에 항상 같은 결과를 냅니다.
//!
//! ## 플로우별 규칙
//!
//! | 항목 | OIDC | OAuth 2.0 |
//! |------|------|-----------|
//! | 외부 ID | `sub` 클레임 | `id` 속성 (숫자는 10진 문자열) |
//! | 이메일 | `email` | `email` |
//! | 이름 | `given_name`, `family_name` | `name`을 첫 공백에서 분리 |
//!
//! - 빈 문자열/공백뿐인 이메일은 없는 것으로 봅니다.
//! - 이름은 두 값 중 하나라도 비어 있지 않을 때만 존재합니다. 빠진 쪽은 `""`.
//! - OAuth 2.0 프로필에 `name` 문자열이 없으면 `MalformedProfile` 입니다.
//!
//! ```rust,ignore
//! let claims = ClaimNormalizer::normalize(ProviderId::GitHub, &profile)?;
//! assert_eq!(claims.external_id, "583231");
//! assert_eq!(claims.names, Some(PersonName::new("The", "Octocat")));
//! ```

use serde_json::Value;

use crate::config::ProviderId;
use crate::domain::models::oauth::{CanonicalClaims, PersonName, RawProfile};
use crate::errors::{AppError, AppResult};
use crate::utils::string_utils::{clean_optional_string, is_valid_string};

pub struct ClaimNormalizer;

impl ClaimNormalizer {
    pub fn normalize(provider: ProviderId, profile: &RawProfile) -> AppResult<CanonicalClaims> {
        let (external_id, names) = match profile {
            RawProfile::Oidc(_) => (Self::oidc_subject(profile)?, Self::oidc_names(profile)),
            RawProfile::OAuth2(_) => (Self::oauth2_id(profile)?, Self::oauth2_names(profile)?),
        };

        let email = clean_optional_string(profile.string_attribute("email").map(str::to_string));

        Ok(CanonicalClaims {
            provider,
            external_id,
            email,
            names: names.filter(|names| !names.is_empty()),
        })
    }

    fn oidc_subject(profile: &RawProfile) -> AppResult<String> {
        profile
            .string_attribute("sub")
            .filter(|sub| is_valid_string(sub))
            .map(str::to_string)
            .ok_or_else(|| AppError::MalformedProfile("OIDC 프로필에 sub 클레임이 없습니다".to_string()))
    }

    fn oidc_names(profile: &RawProfile) -> Option<PersonName> {
        let given = profile.string_attribute("given_name").unwrap_or_default();
        let family = profile.string_attribute("family_name").unwrap_or_default();

        Some(PersonName::new(given, family))
    }

    fn oauth2_id(profile: &RawProfile) -> AppResult<String> {
        match profile.attributes().get("id") {
            Some(Value::Number(number)) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
            Some(Value::String(id)) if is_valid_string(id) => Ok(id.clone()),
            Some(other) => Err(AppError::MalformedProfile(format!(
                "OAuth2 프로필의 id 값을 사용할 수 없습니다: {}",
                other
            ))),
            None => Err(AppError::MalformedProfile("OAuth2 프로필에 id 속성이 없습니다".to_string())),
        }
    }

    fn oauth2_names(profile: &RawProfile) -> AppResult<Option<PersonName>> {
        let name = profile
            .string_attribute("name")
            .ok_or_else(|| AppError::MalformedProfile("OAuth2 프로필에 name 속성이 없습니다".to_string()))?;

        Ok(Some(PersonName::split_full_name(name)))
    }
}
