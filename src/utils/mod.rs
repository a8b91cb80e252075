//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 프로필 속성 문자열 정리/검증
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::clean_optional_string;
//!
//! let email = clean_optional_string(profile.string_attribute("email").map(str::to_string));
//! ```

pub mod string_utils;
