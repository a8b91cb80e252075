//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결 관리를 담당하는 모듈입니다.
//! `STORE_BACKEND=mongodb`(기본값)일 때만 사용됩니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! # MongoDB 연결 URI (트랜잭션을 위해 레플리카 셋 필요)
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//!
//! # 사용할 데이터베이스 이름
//! export DATABASE_NAME="social_login_dev"
//! ```
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//! use crate::repositories::MongoIdentityStore;
//!
//! let database = Database::new().await?;
//! let store = MongoIdentityStore::new(database);
//! store.create_indexes().await?;
//! ```

use log::info;
use mongodb::{bson::doc, options::ClientOptions, Client};

use crate::config::StoreConfig;
use crate::errors::{AppError, AppResult};

/// MongoDB 데이터베이스 연결 래퍼
///
/// 클라이언트는 내부적으로 연결 풀을 공유하므로 복제 비용이 작습니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 환경 변수 설정으로 연결합니다.
    ///
    /// ## 환경 변수
    /// - `MONGODB_URI`: MongoDB 연결 URI (기본값: "mongodb://localhost:27017")
    /// - `DATABASE_NAME`: 데이터베이스 이름 (기본값: "social_login_dev")
    pub async fn new() -> AppResult<Self> {
        Self::connect(&StoreConfig::mongodb_uri(), &StoreConfig::database_name()).await
    }

    /// 주어진 URI와 데이터베이스로 연결하고 ping으로 상태를 확인합니다.
    pub async fn connect(mongodb_uri: &str, database_name: &str) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(mongodb_uri)
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB URI 파싱 실패: {}", e)))?;

        // 애플리케이션 이름 설정 (모니터링 및 로깅에 유용)
        client_options.app_name = Some("social_login_backend".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 클라이언트 생성 실패: {}", e)))?;

        // 연결 테스트
        client
            .database(database_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name: database_name.to_string(),
        })
    }

    /// MongoDB 데이터베이스 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 세션/트랜잭션에 사용하는 클라이언트
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
