//! 신원 해석 요청 DTO
//!
//! 프로토콜 게이트웨이가 토큰 검증을 마친 뒤 보내는 프로필 데이터 구조를 정의합니다.
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::oauth::{ProfileAttributes, ProfileFlow, RawProfile};

/// 외부 로그인 결과를 로컬 사용자로 해석하기 위한 요청 DTO
///
/// ```json
/// {
///   "registration_id": "github",
///   "flow": "oauth2",
///   "attributes": { "id": 583231, "name": "The Octocat", "email": null }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResolveIdentityRequest {
    /// 클라이언트 등록 ID (예: "google", "github")
    #[validate(length(
        min = 1,
        max = 64,
        message = "registration_id는 1-64자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_registration_id"))]
    pub registration_id: String,

    /// 프로필을 얻은 플로우
    pub flow: ProfileFlow,

    /// 검증된 속성/클레임
    #[serde(default)]
    pub attributes: ProfileAttributes,
}

impl ResolveIdentityRequest {
    pub fn into_raw_profile(self) -> (String, RawProfile) {
        (self.registration_id, RawProfile::new(self.flow, self.attributes))
    }
}

/// 등록 ID 형식 검증 (영문, 숫자, 하이픈, 언더스코어만 허용)
fn validate_registration_id(registration_id: &str) -> Result<(), ValidationError> {
    if !registration_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::new("invalid_registration_id")
            .with_message("registration_id는 영문, 숫자, 하이픈, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_and_convert() {
        let request: ResolveIdentityRequest = serde_json::from_value(json!({
            "registration_id": "github",
            "flow": "oauth2",
            "attributes": { "id": 583231, "name": "The Octocat" }
        }))
        .unwrap();

        assert!(request.validate().is_ok());

        let (registration_id, profile) = request.into_raw_profile();
        assert_eq!(registration_id, "github");
        assert_eq!(profile.flow(), ProfileFlow::OAuth2);
        assert_eq!(profile.string_attribute("name"), Some("The Octocat"));
    }

    #[test]
    fn test_rejects_empty_registration_id() {
        let request = ResolveIdentityRequest {
            registration_id: String::new(),
            flow: ProfileFlow::Oidc,
            attributes: ProfileAttributes::new(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_registration_id_with_spaces() {
        let request = ResolveIdentityRequest {
            registration_id: "git hub".to_string(),
            flow: ProfileFlow::OAuth2,
            attributes: ProfileAttributes::new(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_flow_fails_to_deserialize() {
        let result = serde_json::from_value::<ResolveIdentityRequest>(json!({
            "registration_id": "google",
            "flow": "saml",
            "attributes": {}
        }));

        assert!(result.is_err());
    }
}
