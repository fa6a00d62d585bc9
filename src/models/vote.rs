//! # 투표 모델 정의
//!
//! ## 구조체 역할
//! - `Choice`: 투표 선택지 (`"oui"` / `"non"`)
//! - `Vote`: `vote` 컬렉션에 저장되는 투표 문서
//! - `VoteSummary`: 목록 조회용 프로젝션 (`email`, `choice`, `timestamp`)
//! - `CastVoteRequest`: `POST /vote` 요청 본문
//! - `HasVotedQuery`: `GET /hasVoted?email=` 쿼리 파라미터

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// 투표 선택지
///
/// `#[serde(rename_all = "lowercase")]`: `Choice::Oui` ↔ `"oui"`로 직렬화합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Oui,
    Non,
}

/// `"oui"`, `"non"` 이외의 선택지
#[derive(Debug, Error)]
#[error("Choice must be 'oui' or 'non'")]
pub struct InvalidChoice;

impl FromStr for Choice {
    type Err = InvalidChoice;

    // 대소문자를 구분합니다: "Oui"는 거부됩니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oui" => Ok(Choice::Oui),
            "non" => Ok(Choice::Non),
            _ => Err(InvalidChoice),
        }
    }
}

/// 투표 문서
///
/// `userId`는 사용자 문서를 가리키지만 저장소가 참조 무결성을 검사하지는 않습니다.
/// 이메일당 투표 하나라는 규칙은 핸들러의 "조회 후 삽입"으로만 지켜집니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// `"{userId}_{timestamp}"`
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub choice: Choice,
    /// 생성 시각 (RFC 3339, UTC, 마이크로초)
    pub timestamp: String,
}

impl Vote {
    /// `at` 시각에 생성된 투표 문서를 만듭니다.
    ///
    /// `id`와 `timestamp`는 같은 시각 문자열에서 만들어집니다.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        choice: Choice,
        at: DateTime<Utc>,
    ) -> Self {
        let user_id = user_id.into();
        let timestamp = at.to_rfc3339_opts(SecondsFormat::Micros, true);
        Self {
            id: format!("{user_id}_{timestamp}"),
            user_id,
            email: email.into(),
            choice,
            timestamp,
        }
    }
}

/// 투표 목록에 노출되는 필드만 담은 프로젝션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSummary {
    pub email: String,
    pub choice: Choice,
    pub timestamp: String,
}

/// 투표 요청 — `POST /vote`의 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub user_id: Option<String>,
    /// 문자열로 받아 핸들러에서 `Choice`로 검증합니다.
    pub choice: Option<String>,
    pub email: Option<String>,
}

/// `GET /hasVoted?email=...`
#[derive(Debug, Deserialize)]
pub struct HasVotedQuery {
    pub email: Option<String>,
}
