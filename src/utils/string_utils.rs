//! # 문자열 유틸리티
//!
//! 프로바이더 속성처럼 신뢰할 수 없는 문자열 값을 다룰 때 쓰는 함수들입니다.

/// 공백을 제거하고, 비어 있으면 `None`을 반환합니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  ada@example.com ".to_string())), Some("ada@example.com".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 공백 외의 문자가 하나라도 있는지 확인합니다.
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 빈 문자열은 `None`, 나머지는 그대로 복사합니다.
///
/// [`clean_optional_string`]과 달리 공백을 제거하지 않습니다.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("583231"));
        assert!(is_valid_string("  sub  "));
        assert!(!is_valid_string(""));
        assert!(!is_valid_string("\t\n"));
    }

    #[test]
    fn test_non_empty_keeps_whitespace() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("Ada"), Some("Ada".to_string()));
        assert_eq!(non_empty(" "), Some(" ".to_string()));
    }
}
