//! # 문서 저장소(Document Store) 클라이언트
//!
//! SQLite 위에 얹은 아주 얇은 문서 데이터베이스입니다.
//! 컬렉션 하나가 테이블 하나에 대응하고, 각 행은 문서 전체를 JSON 문자열로 담습니다.
//!
//! ```sql
//! CREATE TABLE "vote" (
//!     id   TEXT PRIMARY KEY NOT NULL,  -- 문서의 "id" 필드
//!     body TEXT NOT NULL               -- 문서 전체 (JSON)
//! );
//! ```
//!
//! 키가 아닌 필드(예: `email`)로 조회할 때는 SQLite의 `json_extract(body, '$.email')`을
//! 사용하므로, 별도 인덱스 없이 컬렉션 전체를 훑는 쿼리가 됩니다.
//!
//! ## 제공하는 연산
//! - `find_by_field`: 필드 값이 같은 문서 조회 (`limit`으로 TOP-N 제한)
//! - `insert`: 새 문서 삽입. 같은 `id`가 있으면 `StoreError::Conflict`
//! - `list_all`: 컬렉션의 모든 문서 조회
//! - `ping` / `close`: 헬스체크와 종료 처리

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 저장소가 관리하는 컬렉션 목록
///
/// 테이블 이름은 SQL 문자열에 직접 들어가므로(바인딩 불가),
/// 요청 값이 아닌 이 열거형에서만 만들어지도록 제한합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    User,
    Vote,
}

impl Collection {
    /// 서버 시작 시 자동으로 생성되는 컬렉션들
    pub const ALL: [Collection; 2] = [Collection::User, Collection::Vote];

    /// 테이블 이름
    pub fn name(self) -> &'static str {
        match self {
            Collection::User => "user",
            Collection::Vote => "vote",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 저장소 계층에서 발생하는 에러
///
/// HTTP 계층의 `AppError`와 분리해 두어, 저장소 코드는 axum을 전혀 모릅니다.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 같은 `id`를 가진 문서가 이미 존재함
    #[error("Document '{id}' already exists in collection '{collection}'")]
    Conflict { collection: Collection, id: String },

    /// 삽입하려는 문서에 문자열 `id` 필드가 없음
    #[error("Document for collection '{collection}' has no string 'id' field")]
    MissingId { collection: Collection },

    /// 연결/쿼리 실패
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 문서 본문을 JSON으로 변환하거나 되돌리는 데 실패
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 문서 저장소 클라이언트
///
/// `SqlitePool`은 내부적으로 `Arc`를 사용하므로 `clone()`해도 같은 풀을 공유합니다.
/// `main`에서 한 번 만들어 `AppState`로 모든 핸들러에 주입합니다.
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    /// 연결 문자열로 저장소를 열고 모든 컬렉션을 준비합니다.
    ///
    /// 데이터베이스 파일이 없으면 새로 만듭니다 (`create_if_missing`).
    pub async fn open(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.provision().await?;
        Ok(store)
    }

    /// 테스트용 인메모리 저장소
    ///
    /// SQLite 인메모리 DB는 연결마다 따로 생기므로,
    /// 연결을 하나로 고정하고 만료되지 않게 합니다.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.provision().await?;
        Ok(store)
    }

    /// 없는 컬렉션(테이블)을 생성합니다.
    async fn provision(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            let sql = format!(
                r#"CREATE TABLE IF NOT EXISTS "{}" (
                    id   TEXT PRIMARY KEY NOT NULL,
                    body TEXT NOT NULL
                )"#,
                collection.name()
            );
            sqlx::query(&sql).execute(&self.pool).await?;
            tracing::debug!("Collection '{}' is ready", collection);
        }
        Ok(())
    }

    /// `field` 값이 `value`와 같은 문서들을 삽입 순서대로 조회합니다.
    ///
    /// - `limit`: `Some(1)`이면 첫 번째 문서만 (TOP 1)
    /// - 각 문서는 `T`로 역직렬화됩니다. `T`에 없는 필드는 무시됩니다.
    pub async fn find_by_field<T: DeserializeOwned>(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
        limit: Option<u32>,
    ) -> Result<Vec<T>, StoreError> {
        let mut sql = format!(
            r#"SELECT body FROM "{}" WHERE json_extract(body, ?) = ? ORDER BY rowid"#,
            collection.name()
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        // JSON 경로도 바인딩합니다: "$.email"
        let bodies = sqlx::query_scalar::<_, String>(&sql)
            .bind(format!("$.{field}"))
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        decode_all(&bodies)
    }

    /// 컬렉션의 모든 문서를 삽입 순서대로 조회합니다.
    ///
    /// 좁은 타입(예: `VoteSummary`)을 `T`로 주면 그 필드만 남는 "프로젝션"이 됩니다.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        let sql = format!(r#"SELECT body FROM "{}" ORDER BY rowid"#, collection.name());
        let bodies = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await?;

        decode_all(&bodies)
    }

    /// 새 문서를 삽입합니다.
    ///
    /// 문서를 JSON으로 바꾼 뒤 최상위 `id` 필드를 키로 사용합니다.
    /// 같은 키가 이미 있으면 PRIMARY KEY 제약 위반을 `StoreError::Conflict`로 바꿉니다.
    pub async fn insert<T: Serialize>(
        &self,
        collection: Collection,
        document: &T,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_value(document)?;
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or(StoreError::MissingId { collection })?
            .to_string();

        let sql = format!(r#"INSERT INTO "{}" (id, body) VALUES (?, ?)"#, collection.name());
        let result = sqlx::query(&sql)
            .bind(&id)
            .bind(body.to_string())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict { collection, id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 데이터베이스 왕복 확인 (`SELECT 1`)
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    /// 풀의 모든 연결을 닫습니다. 서버 종료 시 한 번 호출합니다.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn decode_all<T: DeserializeOwned>(bodies: &[String]) -> Result<Vec<T>, StoreError> {
    bodies
        .iter()
        .map(|body| serde_json::from_str(body).map_err(StoreError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct EmailOnly {
        email: String,
    }

    #[tokio::test]
    async fn collections_exist_on_open() {
        let store = DocumentStore::in_memory().await.unwrap();
        for collection in Collection::ALL {
            let docs: Vec<Value> = store.list_all(collection).await.unwrap();
            assert!(docs.is_empty());
        }
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn finds_documents_by_non_key_field() {
        let store = DocumentStore::in_memory().await.unwrap();
        store
            .insert(Collection::Vote, &json!({"id": "v1", "email": "a@x.com", "choice": "oui"}))
            .await
            .unwrap();
        store
            .insert(Collection::Vote, &json!({"id": "v2", "email": "b@x.com", "choice": "non"}))
            .await
            .unwrap();
        store
            .insert(Collection::Vote, &json!({"id": "v3", "email": "a@x.com", "choice": "non"}))
            .await
            .unwrap();

        let found: Vec<Value> = store
            .find_by_field(Collection::Vote, "email", "a@x.com", None)
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().filter_map(|d| d["id"].as_str()).collect();
        assert_eq!(ids, ["v1", "v3"]);

        let top: Vec<Value> = store
            .find_by_field(Collection::Vote, "email", "a@x.com", Some(1))
            .await
            .unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0]["id"], "v1");

        let none: Vec<Value> = store
            .find_by_field(Collection::Vote, "email", "c@x.com", None)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = DocumentStore::in_memory().await.unwrap();
        store
            .insert(Collection::User, &json!({"id": "a@x.com", "email": "a@x.com"}))
            .await
            .unwrap();

        let votes: Vec<Value> = store
            .find_by_field(Collection::Vote, "email", "a@x.com", None)
            .await
            .unwrap();
        assert!(votes.is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let store = DocumentStore::in_memory().await.unwrap();
        let doc = json!({"id": "a@x.com", "email": "a@x.com"});
        store.insert(Collection::User, &doc).await.unwrap();

        let err = store.insert(Collection::User, &doc).await.unwrap_err();
        match err {
            StoreError::Conflict { collection, id } => {
                assert_eq!(collection, Collection::User);
                assert_eq!(id, "a@x.com");
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let users: Vec<Value> = store.list_all(Collection::User).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn document_without_id_is_rejected() {
        let store = DocumentStore::in_memory().await.unwrap();
        let err = store
            .insert(Collection::User, &json!({"email": "a@x.com"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingId { collection: Collection::User }));

        let err = store
            .insert(Collection::User, &json!({"id": 42, "email": "a@x.com"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingId { .. }));
    }

    #[tokio::test]
    async fn list_all_projects_into_narrower_type() {
        let store = DocumentStore::in_memory().await.unwrap();
        store
            .insert(Collection::User, &json!({"id": "b@x.com", "email": "b@x.com", "extra": 1}))
            .await
            .unwrap();
        store
            .insert(Collection::User, &json!({"id": "a@x.com", "email": "a@x.com"}))
            .await
            .unwrap();

        let users: Vec<EmailOnly> = store.list_all(Collection::User).await.unwrap();
        assert_eq!(
            users,
            vec![
                EmailOnly { email: "b@x.com".into() },
                EmailOnly { email: "a@x.com".into() },
            ]
        );
    }

    #[test]
    fn conflict_message_names_collection_and_id() {
        let err = StoreError::Conflict {
            collection: Collection::Vote,
            id: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Document 'x' already exists in collection 'vote'");
    }
}
