//! # Identity Store Port
//!
//! 계정 연동이 사용하는 트랜잭션 저장소 인터페이스입니다.
//! 구체 저장소(MongoDB, 메모리)는 이 트레이트를 구현하고,
//! 서비스 계층은 `Arc<dyn IdentityStore>`를 명시적으로 주입받습니다.
//!
//! ## 트랜잭션 규칙
//!
//! - 한 번의 해석(resolve)은 하나의 [`IdentityTransaction`] 안에서 실행됩니다.
//! - `commit` 전에 트랜잭션이 drop 되거나 `rollback` 되면 아무것도 남지 않습니다.
//! - 유일성 제약(`username`, `email`, `(provider, external_id)`) 위반이나
//!   쓰기 충돌은 `AppError::InconsistentState`로 보고되며, 재시도하지 않습니다.
//!
//! ```rust,ignore
//! let mut tx = store.begin().await?;
//! let matches = tx.find_users_by_account_or_email(ProviderId::Google, "sub-1", Some("ada@example.com")).await?;
//! tx.save_user(&mut user).await?;
//! tx.commit().await?;
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::ProviderId;
use crate::domain::entities::{ExternalAccount, LocalUser};
use crate::errors::AppResult;

/// 트랜잭션 저장소
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// 새 트랜잭션을 시작합니다.
    async fn begin(&self) -> AppResult<Box<dyn IdentityTransaction>>;

    /// ID로 사용자를 조회합니다. 연결 계정이 함께 채워집니다.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<LocalUser>>;

    /// 전체 사용자 목록 (생성 순)
    async fn list_users(&self) -> AppResult<Vec<LocalUser>>;
}

/// 진행 중인 저장소 트랜잭션
///
/// 반환되는 `LocalUser`는 항상 `accounts`가 채워진 상태입니다.
#[async_trait]
pub trait IdentityTransaction: Send {
    /// `(provider, external_id)` 계정이 연결된 사용자, 또는 이메일이 같은 사용자를 찾습니다.
    ///
    /// 결과는 사용자 ID 기준으로 중복이 제거됩니다.
    async fn find_users_by_account_or_email(
        &mut self,
        provider: ProviderId,
        external_id: &str,
        email: Option<&str>,
    ) -> AppResult<Vec<LocalUser>>;

    async fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<LocalUser>>;

    /// 사용자 필드를 저장합니다. 첫 저장 시 `id`를 할당합니다.
    ///
    /// `accounts`는 저장하지 않습니다. 계정은 [`save_account`](Self::save_account)로 저장합니다.
    async fn save_user(&mut self, user: &mut LocalUser) -> AppResult<()>;

    /// 연결 계정을 저장합니다. 첫 저장 시 `id`를 할당합니다.
    async fn save_account(&mut self, account: &mut ExternalAccount) -> AppResult<()>;

    async fn commit(self: Box<Self>) -> AppResult<()>;

    async fn rollback(self: Box<Self>) -> AppResult<()>;
}
