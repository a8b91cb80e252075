//! In-Memory Identity Store
//!
//! 프로세스 메모리에 사용자와 연결 계정을 보관하는 저장소입니다.
//! 로컬 개발(`STORE_BACKEND=memory`)과 테스트에서 사용합니다.
//!
//! 전체 상태를 하나의 `tokio::sync::Mutex`로 보호합니다. 트랜잭션은 락을 소유한 채
//! 작업 사본을 수정하고, `commit` 시 사본을 원본에 반영합니다. 따라서 트랜잭션은
//! 완전히 직렬화되며, 커밋 없이 drop 된 트랜잭션은 흔적을 남기지 않습니다.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::config::ProviderId;
use crate::domain::entities::{ExternalAccount, LocalUser};
use crate::errors::{AppError, AppResult};
use crate::repositories::identity_store::{IdentityStore, IdentityTransaction};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    /// `accounts` 필드는 비워서 보관
    users: BTreeMap<Uuid, LocalUser>,
    accounts: BTreeMap<Uuid, ExternalAccount>,
}

impl MemoryState {
    fn hydrate(&self, user: &LocalUser) -> LocalUser {
        let mut user = user.clone();
        if let Some(user_id) = user.id {
            user.accounts = self
                .accounts
                .values()
                .filter(|account| account.user_id == user_id)
                .cloned()
                .collect();
        }
        user
    }

    fn user_by_id(&self, id: Uuid) -> Option<LocalUser> {
        self.users.get(&id).map(|user| self.hydrate(user))
    }

    fn check_user_constraints(&self, user: &LocalUser) -> AppResult<()> {
        for other in self.users.values().filter(|other| other.id != user.id) {
            if other.username == user.username {
                return Err(AppError::InconsistentState(format!(
                    "username already taken: {}",
                    user.username
                )));
            }
            if user.email.is_some() && other.email == user.email {
                return Err(AppError::InconsistentState(format!(
                    "email already linked to another user: {}",
                    user.email.as_deref().unwrap_or_default()
                )));
            }
        }
        Ok(())
    }

    fn check_account_constraints(&self, account: &ExternalAccount) -> AppResult<()> {
        if !self.users.contains_key(&account.user_id) {
            return Err(AppError::InconsistentState(format!(
                "account references unknown user: {}",
                account.user_id
            )));
        }

        let duplicate = self
            .accounts
            .values()
            .filter(|other| other.id != account.id)
            .any(|other| other.matches(account.provider, &account.external_id));

        if duplicate {
            return Err(AppError::InconsistentState(format!(
                "{} account {} is already linked",
                account.provider, account.external_id
            )));
        }
        Ok(())
    }
}

/// 메모리 저장소
#[derive(Clone, Default)]
pub struct MemoryIdentityStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 커밋된 사용자 수
    pub async fn user_count(&self) -> usize {
        self.state.lock().await.users.len()
    }

    /// 커밋된 연결 계정 수
    pub async fn account_count(&self) -> usize {
        self.state.lock().await.accounts.len()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn begin(&self) -> AppResult<Box<dyn IdentityTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();

        Ok(Box::new(MemoryTransaction { guard, working }))
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<LocalUser>> {
        Ok(self.state.lock().await.user_by_id(id))
    }

    async fn list_users(&self) -> AppResult<Vec<LocalUser>> {
        let state = self.state.lock().await;
        let mut users: Vec<LocalUser> = state.users.values().map(|user| state.hydrate(user)).collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }
}

/// 메모리 트랜잭션
///
/// 락 가드와 작업 사본을 함께 소유합니다.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl IdentityTransaction for MemoryTransaction {
    async fn find_users_by_account_or_email(
        &mut self,
        provider: ProviderId,
        external_id: &str,
        email: Option<&str>,
    ) -> AppResult<Vec<LocalUser>> {
        let mut ids: Vec<Uuid> = self
            .working
            .accounts
            .values()
            .filter(|account| account.matches(provider, external_id))
            .map(|account| account.user_id)
            .collect();

        if let Some(email) = email {
            ids.extend(
                self.working
                    .users
                    .iter()
                    .filter(|(_, user)| user.email.as_deref() == Some(email))
                    .map(|(id, _)| *id),
            );
        }

        let mut seen = HashSet::new();
        Ok(ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.working.user_by_id(id))
            .collect())
    }

    async fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<LocalUser>> {
        Ok(self
            .working
            .users
            .values()
            .find(|user| user.username == username)
            .map(|user| self.working.hydrate(user)))
    }

    async fn save_user(&mut self, user: &mut LocalUser) -> AppResult<()> {
        self.working.check_user_constraints(user)?;

        let id = *user.id.get_or_insert_with(Uuid::new_v4);
        let mut stored = user.clone();
        stored.accounts.clear();
        self.working.users.insert(id, stored);

        debug!("메모리 저장소 사용자 저장: {}", id);
        Ok(())
    }

    async fn save_account(&mut self, account: &mut ExternalAccount) -> AppResult<()> {
        self.working.check_account_constraints(account)?;

        let id = *account.id.get_or_insert_with(Uuid::new_v4);
        self.working.accounts.insert(id, account.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}
