//! # 투표 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 성공 응답 |
//! |--------|------|--------|-----------|
//! | POST | /vote | `vote` | `201 { "status": "vote_saved", "vote": {...} }` |
//! | GET | /hasVoted?email= | `has_voted` | `200 { "alreadyVoted": bool }` |
//! | GET | /listVotes | `list_votes` | `200 { "votes": [{ email, choice, timestamp }] }` |
//!
//! ## 이메일당 한 번
//! `vote`는 같은 이메일의 투표가 있는지 먼저 조회하고, 없을 때만 삽입합니다.
//! 이 두 단계는 원자적이지 않아서 같은 이메일로 동시에 들어온 요청은 둘 다
//! 저장될 수 있습니다. 저장소에는 이메일 유일성 제약이 없습니다.

use crate::{
    db,
    error::AppError,
    models::{CastVoteRequest, Choice, HasVotedQuery, InvalidChoice, Vote},
    routes::{required, AppState},
};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Query, State}, // Query: URL 쿼리 파라미터(?key=value) 추출자
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

/// 투표를 저장합니다.
///
/// `POST /vote` + `{ "userId": "...", "choice": "oui" | "non", "email": "..." }`
///
/// ## 처리 흐름
/// 1. 세 필드 모두 있는지 확인 → 없으면 400
/// 2. `choice`가 `"oui"`/`"non"`인지 확인 → 아니면 400
/// 3. 같은 이메일의 투표가 있으면 403 ("Vous avez déjà voté.")
/// 4. 투표 문서를 만들어 저장하고 201
pub async fn vote(
    State(state): State<AppState>,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    tracing::info!("Processing POST /vote");

    let Json(req) = payload?;

    // let-else: 패턴이 맞지 않으면 else 블록에서 반드시 함수를 빠져나가야 합니다
    let (Some(user_id), Some(choice), Some(email)) = (
        required(req.user_id),
        required(req.choice),
        required(req.email),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields: userId, choice, email".to_string(),
        ));
    };

    let choice: Choice = choice
        .parse()
        .map_err(|e: InvalidChoice| AppError::Validation(e.to_string()))?;

    if db::find_vote_by_email(&state.store, &email).await?.is_some() {
        tracing::warn!(email = %email, "Duplicate vote rejected");
        return Err(AppError::DuplicateVote);
    }

    let vote = Vote::new(user_id, email, choice, Utc::now());
    db::insert_vote(&state.store, &vote).await?;
    tracing::info!(id = %vote.id, "Vote saved");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "vote_saved", "vote": vote })),
    ))
}

/// 이메일의 투표 여부를 확인합니다.
///
/// `GET /hasVoted?email=a@x.com` → `{ "alreadyVoted": true }`
pub async fn has_voted(
    State(state): State<AppState>,
    query: Result<Query<HasVotedQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("Processing GET /hasVoted");

    let Query(query) = query?;
    let email = required(query.email)
        .ok_or_else(|| AppError::Validation("Missing email parameter".to_string()))?;

    let already_voted = db::find_vote_by_email(&state.store, &email).await?.is_some();
    Ok(Json(json!({ "alreadyVoted": already_voted })))
}

/// 모든 투표를 조회합니다. 페이지네이션이나 필터는 없습니다.
///
/// `GET /listVotes` → `{ "votes": [{ "email", "choice", "timestamp" }, ...] }`
pub async fn list_votes(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    tracing::info!("Processing GET /listVotes");

    let votes = db::list_votes(&state.store).await?;
    Ok(Json(json!({ "votes": votes })))
}
