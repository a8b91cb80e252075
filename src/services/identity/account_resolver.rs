//! # Account Resolver
//!
//! 정규화된 클레임을 정확히 하나의 로컬 사용자로 해석합니다.
//! 필요하면 사용자를 만들고, 프로바이더 계정을 연결하고, 최초 한 번 기본 권한을 부여합니다.
//!
//! ## 해석 절차 (단일 트랜잭션)
//!
//! ```text
//! 1. (provider, external_id) 계정 또는 같은 이메일을 가진 사용자 조회
//!    └─ 서로 다른 사용자가 둘 이상이면 InconsistentState
//! 2. 없으면 새 사용자 (이메일은 클레임에서)
//!    └─ 기존 사용자의 이메일이 비어 있으면 클레임 이메일 채택 (기존 이메일은 유지)
//! 3. 사용자명 = 이메일, 없으면 외부 ID
//!    └─ 다른 사용자가 이미 쓰고 있으면 InconsistentState
//! 4. 이름이 있으면 이름/성 덮어쓰기
//! 5. 사용자 저장 (첫 저장 시 ID 할당)
//! 6. 이 프로바이더 계정이 없으면 생성/저장 후 연결
//! 7. 권한이 비어 있으면 기본 권한 하나 부여 후 다시 저장
//! 8. 커밋
//! ```
//!
//! 어느 단계에서든 에러가 나면 트랜잭션을 롤백하고 에러를 그대로 돌려줍니다.
//! 재시도는 호출자의 몫입니다.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::config::AuthenticationType;
use crate::domain::entities::{ExternalAccount, LocalUser};
use crate::domain::models::oauth::CanonicalClaims;
use crate::errors::{AppError, AppResult};
use crate::repositories::{IdentityStore, IdentityTransaction};
use crate::services::identity::authority_grants::AuthorityGrants;

pub struct AccountResolver {
    store: Arc<dyn IdentityStore>,
    grants: Arc<dyn AuthorityGrants>,
}

impl AccountResolver {
    pub fn new(store: Arc<dyn IdentityStore>, grants: Arc<dyn AuthorityGrants>) -> Self {
        Self { store, grants }
    }

    /// 클레임을 로컬 사용자로 해석합니다.
    ///
    /// 반환되는 사용자는 저장 완료 상태이며 `id`, `accounts`, `authorities`가 채워져 있습니다.
    pub async fn resolve(&self, claims: CanonicalClaims) -> AppResult<LocalUser> {
        let mut tx = self.store.begin().await?;

        match self.resolve_in(tx.as_mut(), &claims).await {
            Ok(user) => {
                tx.commit().await.inspect_err(|e| log_failure(&claims, e))?;
                Ok(user)
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!("트랜잭션 롤백 실패: {}", rollback_error);
                }
                log_failure(&claims, &e);
                Err(e)
            }
        }
    }

    async fn resolve_in(
        &self,
        tx: &mut dyn IdentityTransaction,
        claims: &CanonicalClaims,
    ) -> AppResult<LocalUser> {
        let mut matches = tx
            .find_users_by_account_or_email(claims.provider, &claims.external_id, claims.email.as_deref())
            .await?;

        if matches.len() > 1 {
            return Err(AppError::InconsistentState(format!(
                "{} 계정 {} 과(와) 이메일이 서로 다른 사용자 {}명에 연결되어 있습니다",
                claims.provider,
                claims.external_id,
                matches.len()
            )));
        }

        let mut user = match matches.pop() {
            Some(user) => user,
            None => {
                debug!("새 사용자 생성: {} {}", claims.provider, claims.external_id);
                LocalUser::new(claims.preferred_username(), claims.email.clone())
            }
        };
        let is_new = !user.is_persisted();

        if user.email.is_none() {
            user.email = claims.email.clone();
        }

        let username = claims.preferred_username();
        if let Some(holder) = tx.find_user_by_username(username).await? {
            if holder.id != user.id {
                return Err(AppError::InconsistentState(format!(
                    "사용자명 {} 이(가) 이미 다른 사용자에게 할당되어 있습니다",
                    username
                )));
            }
        }
        user.username = username.to_string();

        if let Some(names) = &claims.names {
            user.apply_names(names);
        }
        user.last_auth_type = AuthenticationType::from(claims.provider);
        user.touch();

        tx.save_user(&mut user).await?;

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("저장 후에도 사용자 ID가 없습니다".to_string()))?;

        if !user.has_account_for(claims.provider) {
            let mut account = ExternalAccount::new(claims.provider, claims.external_id.clone(), user_id);
            tx.save_account(&mut account).await?;
            user.accounts.push(account);

            info!("🔗 {} 계정 연결: {} → {}", claims.provider, claims.external_id, user_id);
        }

        if user.authorities.is_empty() {
            user.authorities.push(self.grants.default_grant());
            tx.save_user(&mut user).await?;
        }

        if is_new {
            info!("✅ 새 사용자 등록: {} ({})", user.username, user_id);
        }

        Ok(user)
    }
}

fn log_failure(claims: &CanonicalClaims, e: &AppError) {
    match e {
        AppError::InconsistentState(_) => {
            error!("계정 해석 실패 ({} {}): {}", claims.provider, claims.external_id, e)
        }
        _ => warn!("계정 해석 실패 ({} {}): {}", claims.provider, claims.external_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::config::ProviderId;
    use crate::domain::models::auth::Authority;
    use crate::domain::models::oauth::PersonName;
    use crate::repositories::MemoryIdentityStore;
    use crate::services::identity::authority_grants::RoleAuthorityGrants;

    fn resolver(store: &MemoryIdentityStore) -> AccountResolver {
        AccountResolver::new(
            Arc::new(store.clone()),
            Arc::new(RoleAuthorityGrants::new("system-full-access")),
        )
    }

    fn claims(provider: ProviderId, external_id: &str, email: Option<&str>) -> CanonicalClaims {
        CanonicalClaims {
            provider,
            external_id: external_id.to_string(),
            email: email.map(str::to_string),
            names: None,
        }
    }

    #[actix_web::test]
    async fn test_first_login_creates_user_account_and_default_grant() {
        let store = MemoryIdentityStore::new();
        let mut input = claims(ProviderId::Google, "sub-1", Some("ada@example.com"));
        input.names = Some(PersonName::new("Ada", "Lovelace"));

        let user = resolver(&store).resolve(input).await.unwrap();

        assert!(user.id.is_some());
        assert_eq!(user.username, "ada@example.com");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(user.authorities, vec![Authority::resource_role("system-full-access")]);
        assert_eq!(user.accounts.len(), 1);
        assert_eq!(user.last_auth_type, AuthenticationType::Google);

        let stored = store.find_user_by_id(user.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.authorities.len(), 1);
        assert_eq!(stored.accounts.len(), 1);
    }

    #[actix_web::test]
    async fn test_repeated_login_is_idempotent() {
        let store = MemoryIdentityStore::new();
        let resolver = resolver(&store);

        let first = resolver.resolve(claims(ProviderId::GitHub, "583231", None)).await.unwrap();
        let second = resolver.resolve(claims(ProviderId::GitHub, "583231", None)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.accounts.len(), 1);
        assert_eq!(second.authorities.len(), 1);
        assert_eq!(store.user_count().await, 1);
        assert_eq!(store.account_count().await, 1);
    }

    #[actix_web::test]
    async fn test_existing_authorities_are_not_overwritten() {
        let store = MemoryIdentityStore::new();
        let first = resolver(&store)
            .resolve(claims(ProviderId::GitHub, "583231", None))
            .await
            .unwrap();

        let other_grants = AccountResolver::new(
            Arc::new(store.clone()),
            Arc::new(RoleAuthorityGrants::new("other-role")),
        );
        let second = other_grants
            .resolve(claims(ProviderId::GitHub, "583231", None))
            .await
            .unwrap();

        assert_eq!(second.authorities, first.authorities);
    }

    #[actix_web::test]
    async fn test_email_match_links_second_provider() {
        let store = MemoryIdentityStore::new();
        let resolver = resolver(&store);

        let google = resolver
            .resolve(claims(ProviderId::Google, "sub-1", Some("ada@example.com")))
            .await
            .unwrap();
        let github = resolver
            .resolve(claims(ProviderId::GitHub, "583231", Some("ada@example.com")))
            .await
            .unwrap();

        assert_eq!(google.id, github.id);
        assert_eq!(github.accounts.len(), 2);
        assert!(github.has_account_for(ProviderId::Google));
        assert!(github.has_account_for(ProviderId::GitHub));
        assert_eq!(github.authorities.len(), 1);
        assert_eq!(store.user_count().await, 1);
    }

    #[actix_web::test]
    async fn test_username_falls_back_to_external_id() {
        let store = MemoryIdentityStore::new();

        let user = resolver(&store)
            .resolve(claims(ProviderId::GitHub, "12345", None))
            .await
            .unwrap();

        assert_eq!(user.username, "12345");
        assert_eq!(user.email, None);
    }

    #[actix_web::test]
    async fn test_names_overwritten_on_later_login() {
        let store = MemoryIdentityStore::new();
        let resolver = resolver(&store);

        let mut input = claims(ProviderId::GitHub, "1", None);
        input.names = Some(PersonName::new("Ada", "Lovelace"));
        resolver.resolve(input.clone()).await.unwrap();

        input.names = Some(PersonName::new("", "King"));
        let user = resolver.resolve(input.clone()).await.unwrap();
        assert_eq!(user.first_name, None);
        assert_eq!(user.last_name.as_deref(), Some("King"));

        input.names = None;
        let user = resolver.resolve(input).await.unwrap();
        assert_eq!(user.last_name.as_deref(), Some("King"));
    }

    #[actix_web::test]
    async fn test_account_and_email_on_different_users_is_inconsistent() {
        let store = MemoryIdentityStore::new();
        let resolver = resolver(&store);

        resolver.resolve(claims(ProviderId::GitHub, "1", None)).await.unwrap();
        resolver
            .resolve(claims(ProviderId::Google, "sub-1", Some("ada@example.com")))
            .await
            .unwrap();

        let result = resolver
            .resolve(claims(ProviderId::GitHub, "1", Some("ada@example.com")))
            .await;

        assert!(matches!(result, Err(AppError::InconsistentState(_))));
    }

    #[actix_web::test]
    async fn test_username_taken_by_other_user_rolls_back() {
        let store = MemoryIdentityStore::new();
        let resolver = resolver(&store);

        // external id "12345" becomes the username of the first user
        resolver.resolve(claims(ProviderId::GitHub, "12345", None)).await.unwrap();

        let result = resolver.resolve(claims(ProviderId::Google, "12345", None)).await;

        assert!(matches!(result, Err(AppError::InconsistentState(_))));
        assert_eq!(store.user_count().await, 1);
        assert_eq!(store.account_count().await, 1);
    }

    #[actix_web::test]
    async fn test_email_learned_later_allows_merge_from_other_provider() {
        let store = MemoryIdentityStore::new();
        let resolver = resolver(&store);

        let first = resolver.resolve(claims(ProviderId::GitHub, "583231", None)).await.unwrap();
        assert_eq!(first.email, None);

        let second = resolver
            .resolve(claims(ProviderId::GitHub, "583231", Some("ada@example.com")))
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.username, "ada@example.com");
        assert_eq!(second.email.as_deref(), Some("ada@example.com"));

        let google = resolver
            .resolve(claims(ProviderId::Google, "sub-1", Some("ada@example.com")))
            .await
            .unwrap();
        assert_eq!(google.id, first.id);
        assert!(google.has_account_for(ProviderId::GitHub));
        assert!(google.has_account_for(ProviderId::Google));
        assert_eq!(store.user_count().await, 1);
        assert_eq!(store.account_count().await, 2);
    }

    #[actix_web::test]
    async fn test_existing_email_is_kept() {
        let store = MemoryIdentityStore::new();
        let resolver = resolver(&store);

        resolver
            .resolve(claims(ProviderId::GitHub, "583231", Some("ada@example.com")))
            .await
            .unwrap();
        let user = resolver
            .resolve(claims(ProviderId::GitHub, "583231", Some("ada@work.example.com")))
            .await
            .unwrap();

        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.username, "ada@work.example.com");
    }

    /// `save_account`만 실패하는 트랜잭션
    struct FailingAccountTransaction {
        inner: Box<dyn IdentityTransaction>,
    }

    #[async_trait]
    impl IdentityTransaction for FailingAccountTransaction {
        async fn find_users_by_account_or_email(
            &mut self,
            provider: ProviderId,
            external_id: &str,
            email: Option<&str>,
        ) -> AppResult<Vec<LocalUser>> {
            self.inner.find_users_by_account_or_email(provider, external_id, email).await
        }

        async fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<LocalUser>> {
            self.inner.find_user_by_username(username).await
        }

        async fn save_user(&mut self, user: &mut LocalUser) -> AppResult<()> {
            self.inner.save_user(user).await
        }

        async fn save_account(&mut self, _account: &mut ExternalAccount) -> AppResult<()> {
            Err(AppError::InconsistentState("account already linked".to_string()))
        }

        async fn commit(self: Box<Self>) -> AppResult<()> {
            self.inner.commit().await
        }

        async fn rollback(self: Box<Self>) -> AppResult<()> {
            self.inner.rollback().await
        }
    }

    struct FailingAccountStore {
        inner: MemoryIdentityStore,
    }

    #[async_trait]
    impl IdentityStore for FailingAccountStore {
        async fn begin(&self) -> AppResult<Box<dyn IdentityTransaction>> {
            let inner = self.inner.begin().await?;
            Ok(Box::new(FailingAccountTransaction { inner }))
        }

        async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<LocalUser>> {
            self.inner.find_user_by_id(id).await
        }

        async fn list_users(&self) -> AppResult<Vec<LocalUser>> {
            self.inner.list_users().await
        }
    }

    #[actix_web::test]
    async fn test_failure_after_user_saved_rolls_back_everything() {
        let store = MemoryIdentityStore::new();
        let resolver = AccountResolver::new(
            Arc::new(FailingAccountStore { inner: store.clone() }),
            Arc::new(RoleAuthorityGrants::new("system-full-access")),
        );

        let result = resolver
            .resolve(claims(ProviderId::Google, "sub-1", Some("ada@example.com")))
            .await;

        assert!(matches!(result, Err(AppError::InconsistentState(_))));
        assert_eq!(store.user_count().await, 0);
        assert_eq!(store.account_count().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_logins_create_one_user() {
        let store = MemoryIdentityStore::new();
        let resolver = Arc::new(resolver(&store));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                tokio::spawn(async move {
                    resolver
                        .resolve(claims(ProviderId::Google, "sub-1", Some("ada@example.com")))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            let user = handle.await.unwrap().unwrap();
            ids.push(user.id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.user_count().await, 1);
        assert_eq!(store.account_count().await, 1);
    }
}
