//! # Data & Server Configuration
//!
//! 실행 환경, HTTP 서버 바인딩, 저장소 백엔드 선택 등
//! 인프라 관련 설정을 환경 변수에서 읽어옵니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 현재 실행 환경을 반환합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 우선 확인하고, 없으면 프로덕션으로 간주합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 사용자/연동 계정 저장소 백엔드
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// MongoDB (레플리카 셋 필요: 다중 문서 트랜잭션 사용)
    MongoDb,
    /// 프로세스 메모리 (개발/테스트 전용, 재시작 시 소실)
    Memory,
}

/// 저장소 설정
///
/// ```bash
/// export STORE_BACKEND="mongodb"   # mongodb | memory
/// export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
/// export DATABASE_NAME="social_login_dev"
/// ```
pub struct StoreConfig;

impl StoreConfig {
    pub fn backend() -> StoreBackend {
        Self::backend_from_str(&env::var("STORE_BACKEND").unwrap_or_default())
    }

    pub fn backend_from_str(s: &str) -> StoreBackend {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            _ => StoreBackend::MongoDb,
        }
    }

    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "social_login_dev".to_string())
    }
}
