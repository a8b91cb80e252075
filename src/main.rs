use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use social_login_backend::app_state::AppState;
use social_login_backend::config::{Environment, IdentityConfig, ServerConfig, StoreBackend, StoreConfig};
use social_login_backend::db::Database;
use social_login_backend::errors::AppResult;
use social_login_backend::repositories::{IdentityStore, MemoryIdentityStore, MongoIdentityStore};
use social_login_backend::routes::configure_all_routes;
use social_login_backend::services::identity::RoleAuthorityGrants;

/// Rate Limiting 설정
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    let (profile, env_loaded) = load_env_file();
    init_logging();

    match env_loaded {
        Ok(()) => info!("Current profile: {} (.env 로드 됨)", profile),
        Err(e) => warn!("Current profile: {} (.env 파일 로드 실패: {})", profile, e),
    }

    info!("🚀 소셜 로그인 계정 연동 서비스 시작중... ({:?})", Environment::current());

    // 저장소 초기화
    let store = initialize_store()
        .await
        .map_err(|e| std::io::Error::other(format!("저장소 초기화 실패: {}", e)))?;

    let grants = Arc::new(RoleAuthorityGrants::from_env());
    info!("🔑 기본 권한 역할: {}", grants.role_code());

    let state = web::Data::new(AppState::from_config(store, grants));
    info!(
        "✅ 활성 프로바이더: {:?}",
        state.identity_service.enabled_providers()
    );

    if IdentityConfig::gateway_token().is_none() {
        warn!("⚠️ IDENTITY_GATEWAY_TOKEN 이 설정되지 않았습니다. /api/v1 요청은 모두 거부됩니다");
    }

    // HTTP 서버 시작
    start_http_server(state).await
}

async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 프로필별 .env 파일을 읽습니다.
///
/// 로거는 `RUST_LOG`를 읽은 뒤에 초기화되므로, 결과는 반환해서 나중에 기록합니다.
fn load_env_file() -> (String, Result<(), dotenv::Error>) {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        // 기본 .env 파일 로드
        _ => dotenv().map(|_| ()),
    };

    (profile, result)
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// `STORE_BACKEND` 설정에 따라 저장소를 만듭니다.
async fn initialize_store() -> AppResult<Arc<dyn IdentityStore>> {
    match StoreConfig::backend() {
        StoreBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::new().await?;

            let store = MongoIdentityStore::new(database);
            store.create_indexes().await?;

            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            if Environment::current() == Environment::Production {
                warn!("⚠️ 프로덕션 환경에서 메모리 저장소를 사용합니다. 재시작 시 모든 사용자가 사라집니다");
            }
            info!("🧪 메모리 저장소 사용");

            Ok(Arc::new(MemoryIdentityStore::new()))
        }
    }
}

fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
