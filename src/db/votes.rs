//! # 투표 컬렉션 쿼리
//!
//! `vote` 컬렉션에 대한 타입이 있는 조회/삽입/목록 함수들입니다.
//!
//! 투표 문서의 키는 `userId`와 시각으로 만들어지므로 저장소 수준에서는
//! 이메일 중복을 막지 못합니다. 중복 방지는 `find_vote_by_email`로 먼저 확인하는
//! 핸들러의 몫이며, 두 요청이 동시에 들어오면 둘 다 통과할 수 있습니다.

use crate::db::{Collection, DocumentStore, StoreError};
use crate::models::{Vote, VoteSummary};

/// 이메일로 투표 하나를 조회합니다 (TOP 1).
pub async fn find_vote_by_email(
    store: &DocumentStore,
    email: &str,
) -> Result<Option<Vote>, StoreError> {
    let votes = store
        .find_by_field::<Vote>(Collection::Vote, "email", email, Some(1))
        .await?;

    Ok(votes.into_iter().next())
}

pub async fn insert_vote(store: &DocumentStore, vote: &Vote) -> Result<(), StoreError> {
    store.insert(Collection::Vote, vote).await
}

/// 모든 투표를 `email`, `choice`, `timestamp`만 남겨 조회합니다.
pub async fn list_votes(store: &DocumentStore) -> Result<Vec<VoteSummary>, StoreError> {
    store.list_all(Collection::Vote).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Choice;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn finds_vote_by_email() {
        let store = DocumentStore::in_memory().await.unwrap();
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let vote = Vote::new("u1", "a@x.com", Choice::Non, at);
        insert_vote(&store, &vote).await.unwrap();

        assert_eq!(find_vote_by_email(&store, "a@x.com").await.unwrap(), Some(vote));
        assert!(find_vote_by_email(&store, "b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_projections_in_insertion_order() {
        let store = DocumentStore::in_memory().await.unwrap();
        let start = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let votes = [
            Vote::new("u1", "a@x.com", Choice::Oui, start),
            Vote::new("u2", "b@x.com", Choice::Non, start + Duration::seconds(1)),
        ];
        for vote in &votes {
            insert_vote(&store, vote).await.unwrap();
        }

        let listed = list_votes(&store).await.unwrap();
        let expected: Vec<VoteSummary> = votes
            .iter()
            .map(|v| VoteSummary {
                email: v.email.clone(),
                choice: v.choice,
                timestamp: v.timestamp.clone(),
            })
            .collect();
        assert_eq!(listed, expected);
    }
}
