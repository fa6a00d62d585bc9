//! # 사용자 컬렉션 쿼리
//!
//! `user` 컬렉션에 대한 타입이 있는 조회/삽입 함수들입니다.

use crate::db::{Collection, DocumentStore, StoreError};
use crate::models::User;

/// 이메일로 사용자를 조회합니다.
///
/// 이메일이 같은 문서가 여럿이면 먼저 저장된 것을 돌려줍니다.
pub async fn find_user_by_email(
    store: &DocumentStore,
    email: &str,
) -> Result<Option<User>, StoreError> {
    let users = store
        .find_by_field::<User>(Collection::User, "email", email, Some(1))
        .await?;

    // into_iter().next(): Vec의 첫 번째 원소를 소유권째 꺼냅니다
    Ok(users.into_iter().next())
}

/// 사용자 문서를 저장합니다. 같은 `id`(이메일)가 있으면 `StoreError::Conflict`.
pub async fn insert_user(store: &DocumentStore, user: &User) -> Result<(), StoreError> {
    store.insert(Collection::User, user).await
}
