//! MongoDB Identity Store
//!
//! `users`, `accounts` 두 컬렉션에 사용자와 연결 계정을 저장하는 저장소입니다.
//! 한 번의 해석은 클라이언트 세션 위의 다중 문서 트랜잭션으로 실행됩니다.
//!
//! # 요구 사항
//!
//! MongoDB 트랜잭션은 레플리카 셋(또는 샤드 클러스터)에서만 동작합니다.
//! 단일 노드 개발 환경에서는 `--replSet rs0`으로 실행한 뒤 `rs.initiate()`가 필요합니다.
//!
//! # 인덱스
//!
//! | 컬렉션 | 키 | 옵션 |
//! |--------|----|------|
//! | users | `username` | unique |
//! | users | `email` | unique, 문자열일 때만 (partial) |
//! | users | `created_at` | 정렬용 |
//! | accounts | `(provider, external_id)` | unique |
//! | accounts | `user_id` | 조회용 |
//!
//! 유니크 인덱스 위반(11000)과 쓰기 충돌(112)은 `AppError::InconsistentState`로 변환됩니다.

use std::collections::HashMap;

use async_trait::async_trait;
use futures_util::StreamExt;
use log::{debug, info};
use mongodb::{
    bson::{doc, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure, TRANSIENT_TRANSACTION_ERROR},
    options::IndexOptions,
    ClientSession, Collection, IndexModel,
};
use uuid::Uuid;

use crate::config::ProviderId;
use crate::db::Database;
use crate::domain::entities::{ExternalAccount, LocalUser};
use crate::errors::{AppError, AppResult};
use crate::repositories::identity_store::{IdentityStore, IdentityTransaction};
use crate::repositories::users::documents::{AccountDocument, UserDocument};

const USERS_COLLECTION: &str = "users";
const ACCOUNTS_COLLECTION: &str = "accounts";

const DUPLICATE_KEY: i32 = 11000;
const WRITE_CONFLICT: i32 = 112;

/// 유니크 인덱스 위반 또는 쓰기 충돌 코드인지 확인합니다.
fn is_conflict_code(code: i32) -> bool {
    matches!(code, DUPLICATE_KEY | WRITE_CONFLICT)
}

fn server_error_code(err: &MongoError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    }
}

/// MongoDB 에러를 도메인 에러로 변환합니다.
fn map_mongo_error(err: MongoError) -> AppError {
    let conflict = server_error_code(&err).is_some_and(is_conflict_code)
        || err.contains_label(TRANSIENT_TRANSACTION_ERROR);

    if conflict {
        AppError::InconsistentState(format!("저장소 제약 조건 위반 또는 쓰기 충돌: {}", err))
    } else {
        AppError::DatabaseError(err.to_string())
    }
}

/// MongoDB 저장소
#[derive(Clone)]
pub struct MongoIdentityStore {
    db: Database,
    users: Collection<UserDocument>,
    accounts: Collection<AccountDocument>,
}

impl MongoIdentityStore {
    pub fn new(db: Database) -> Self {
        let database = db.get_database();

        Self {
            users: database.collection::<UserDocument>(USERS_COLLECTION),
            accounts: database.collection::<AccountDocument>(ACCOUNTS_COLLECTION),
            db,
        }
    }

    /// 유일성 제약을 보장하는 인덱스를 생성합니다.
    ///
    /// 애플리케이션 시작 시 한 번 호출합니다. 이미 있으면 아무 일도 하지 않습니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        // 이메일은 있을 때만 유니크
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .partial_filter_expression(doc! { "email": { "$type": "string" } })
                .name("email_unique_when_present".to_string())
                .build())
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": 1 })
            .options(IndexOptions::builder()
                .name("created_at_asc".to_string())
                .build())
            .build();

        self.users
            .create_indexes([username_index, email_index, created_at_index])
            .await
            .map_err(map_mongo_error)?;

        let account_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "external_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_external_id_unique".to_string())
                .build())
            .build();

        let account_user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .name("user_id".to_string())
                .build())
            .build();

        self.accounts
            .create_indexes([account_index, account_user_index])
            .await
            .map_err(map_mongo_error)?;

        info!("✅ 계정 연동 인덱스 준비 완료: {}", self.db.database_name());
        Ok(())
    }

    async fn accounts_by_user(&self, filter: Document) -> AppResult<HashMap<String, Vec<ExternalAccount>>> {
        let mut cursor = self.accounts.find(filter).await.map_err(map_mongo_error)?;

        let mut grouped: HashMap<String, Vec<ExternalAccount>> = HashMap::new();
        while let Some(document) = cursor.next().await {
            let document = document.map_err(map_mongo_error)?;
            grouped
                .entry(document.user_id.clone())
                .or_default()
                .push(document.into_account()?);
        }

        Ok(grouped)
    }
}

#[async_trait]
impl IdentityStore for MongoIdentityStore {
    async fn begin(&self) -> AppResult<Box<dyn IdentityTransaction>> {
        let mut session = self.db.client().start_session().await.map_err(map_mongo_error)?;
        session.start_transaction().await.map_err(map_mongo_error)?;

        Ok(Box::new(MongoTransaction {
            session,
            users: self.users.clone(),
            accounts: self.accounts.clone(),
        }))
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<LocalUser>> {
        let id = id.to_string();

        let Some(document) = self
            .users
            .find_one(doc! { "_id": id.as_str() })
            .await
            .map_err(map_mongo_error)?
        else {
            return Ok(None);
        };

        let mut accounts = self.accounts_by_user(doc! { "user_id": id.as_str() }).await?;
        let linked = accounts.remove(&id).unwrap_or_default();

        document.into_user(linked).map(Some)
    }

    async fn list_users(&self) -> AppResult<Vec<LocalUser>> {
        let mut cursor = self
            .users
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(map_mongo_error)?;

        let mut accounts = self.accounts_by_user(doc! {}).await?;

        let mut users = Vec::new();
        while let Some(document) = cursor.next().await {
            let document = document.map_err(map_mongo_error)?;
            let linked = accounts.remove(&document.id).unwrap_or_default();
            users.push(document.into_user(linked)?);
        }

        Ok(users)
    }
}

/// MongoDB 트랜잭션
///
/// 커밋 없이 drop 되면 드라이버가 세션의 트랜잭션을 중단합니다.
pub struct MongoTransaction {
    session: ClientSession,
    users: Collection<UserDocument>,
    accounts: Collection<AccountDocument>,
}

impl MongoTransaction {
    async fn find_user_documents(&mut self, filter: Document) -> AppResult<Vec<UserDocument>> {
        let mut cursor = self
            .users
            .find(filter)
            .session(&mut self.session)
            .await
            .map_err(map_mongo_error)?;

        let mut documents = Vec::new();
        while let Some(document) = cursor.next(&mut self.session).await {
            documents.push(document.map_err(map_mongo_error)?);
        }
        Ok(documents)
    }

    async fn hydrate(&mut self, documents: Vec<UserDocument>) -> AppResult<Vec<LocalUser>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
        let mut cursor = self
            .accounts
            .find(doc! { "user_id": { "$in": ids } })
            .session(&mut self.session)
            .await
            .map_err(map_mongo_error)?;

        let mut grouped: HashMap<String, Vec<ExternalAccount>> = HashMap::new();
        while let Some(document) = cursor.next(&mut self.session).await {
            let document = document.map_err(map_mongo_error)?;
            grouped
                .entry(document.user_id.clone())
                .or_default()
                .push(document.into_account()?);
        }

        documents
            .into_iter()
            .map(|document| {
                let linked = grouped.remove(&document.id).unwrap_or_default();
                document.into_user(linked)
            })
            .collect()
    }
}

#[async_trait]
impl IdentityTransaction for MongoTransaction {
    async fn find_users_by_account_or_email(
        &mut self,
        provider: ProviderId,
        external_id: &str,
        email: Option<&str>,
    ) -> AppResult<Vec<LocalUser>> {
        let linked = self
            .accounts
            .find_one(doc! { "provider": provider.as_str(), "external_id": external_id })
            .session(&mut self.session)
            .await
            .map_err(map_mongo_error)?;

        let mut clauses = Vec::new();
        if let Some(account) = linked {
            clauses.push(doc! { "_id": account.user_id });
        }
        if let Some(email) = email {
            clauses.push(doc! { "email": email });
        }
        if clauses.is_empty() {
            return Ok(Vec::new());
        }

        let documents = self.find_user_documents(doc! { "$or": clauses }).await?;
        self.hydrate(documents).await
    }

    async fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<LocalUser>> {
        let documents = self.find_user_documents(doc! { "username": username }).await?;
        Ok(self.hydrate(documents).await?.into_iter().next())
    }

    async fn save_user(&mut self, user: &mut LocalUser) -> AppResult<()> {
        match user.id {
            Some(id) => {
                let document = UserDocument::from_user(id, user);
                self.users
                    .replace_one(doc! { "_id": id.to_string() }, &document)
                    .session(&mut self.session)
                    .await
                    .map_err(map_mongo_error)?;
            }
            None => {
                let id = Uuid::new_v4();
                let document = UserDocument::from_user(id, user);
                self.users
                    .insert_one(&document)
                    .session(&mut self.session)
                    .await
                    .map_err(map_mongo_error)?;
                user.id = Some(id);
            }
        }

        debug!("사용자 저장 (트랜잭션): {}", user.username);
        Ok(())
    }

    async fn save_account(&mut self, account: &mut ExternalAccount) -> AppResult<()> {
        let id = account.id.unwrap_or_else(Uuid::new_v4);
        let document = AccountDocument::from_account(id, account);

        self.accounts
            .insert_one(&document)
            .session(&mut self.session)
            .await
            .map_err(map_mongo_error)?;

        account.id = Some(id);
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        self.session.commit_transaction().await.map_err(map_mongo_error)
    }

    async fn rollback(mut self: Box<Self>) -> AppResult<()> {
        self.session.abort_transaction().await.map_err(map_mongo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_codes() {
        assert!(is_conflict_code(11000));
        assert!(is_conflict_code(112));
        assert!(!is_conflict_code(13));
        assert!(!is_conflict_code(251));
    }

    #[test]
    fn test_io_error_is_database_error() {
        let err = MongoError::from(std::io::Error::other("connection reset"));

        assert_eq!(server_error_code(&err), None);
        assert!(matches!(map_mongo_error(err), AppError::DatabaseError(_)));
    }
}
