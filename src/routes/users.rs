//! # 사용자 등록 핸들러
//!
//! ## 엔드포인트
//! - `POST /postUser` + `{ "email": "..." }`
//!   - 이미 등록된 이메일 → `200 { "status": "exists", "document": {...} }`
//!   - 새 이메일 → `201 { "status": "saved", "document": { "id": email, "email": email } }`
//!   - 이메일 누락 → `400 { "error": "Missing required field: email" }`

use crate::{
    db,
    error::AppError,
    models::{RegisterUserRequest, User},
    routes::{required, AppState},
};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// 이메일로 사용자를 등록하거나, 이미 있으면 기존 문서를 돌려줍니다.
///
/// `payload: Result<Json<_>, JsonRejection>`: 본문 파싱 실패를 axum 기본 응답 대신
/// `AppError::Validation`으로 바꾸기 위해 Result로 받습니다.
///
/// 조회와 삽입 사이에 같은 이메일의 요청이 끼어들면, 문서 키(`id == email`)가
/// 두 번째 삽입을 거부하므로 `StoreError::Conflict`가 500으로 올라갑니다.
pub async fn post_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    tracing::info!("Processing POST /postUser");

    let Json(req) = payload?;
    let email = required(req.email)
        .ok_or_else(|| AppError::Validation("Missing required field: email".to_string()))?;

    if let Some(existing) = db::find_user_by_email(&state.store, &email).await? {
        tracing::debug!(email = %existing.email, "User already registered");
        return Ok((
            StatusCode::OK,
            Json(json!({ "status": "exists", "document": existing })),
        ));
    }

    let user = User::new(email);
    db::insert_user(&state.store, &user).await?;
    tracing::info!(email = %user.email, "User saved");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "saved", "document": user })),
    ))
}
