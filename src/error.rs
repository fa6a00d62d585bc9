//! # 에러 처리 모듈
//!
//! HTTP 경계에서 사용하는 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 핸들러가 돌려줄 수 있는 모든 실패를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "error": "<메시지>" }` JSON 응답으로 자동 변환
//! - `handle_panic`: 핸들러 안의 panic도 같은 모양의 500 응답으로 변환
//!
//! | variant | HTTP 상태 |
//! |---------|-----------|
//! | `Validation` | 400 Bad Request |
//! | `DuplicateVote` | 403 Forbidden |
//! | `Storage` | 500 Internal Server Error |
//! | `Internal` | 500 Internal Server Error |

use crate::db::StoreError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection}, // 추출자(Extractor) 실패 타입
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;

/// 핸들러에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러가 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필수 값 누락, 잘못된 선택지, 파싱할 수 없는 본문 (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// 이 이메일로 이미 투표함 (HTTP 403)
    #[error("Vous avez déjà voté.")]
    DuplicateVote,

    /// 문서 저장소 실패 (HTTP 500)
    /// #[from]: `?` 연산자로 StoreError → AppError 자동 변환
    /// transparent: 메시지를 StoreError의 Display 그대로 사용
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// 예상하지 못한 실패, 예를 들어 핸들러 panic (HTTP 500)
    #[error("{0}")]
    Internal(String),
}

// Json/Query 추출자가 실패하면 axum은 기본적으로 text/plain 응답을 만듭니다.
// 핸들러가 `Result<Json<T>, JsonRejection>`으로 받은 뒤 `?`를 쓰면
// 아래 From 구현을 거쳐 JSON 형태의 400 응답이 됩니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateVote => StatusCode::FORBIDDEN,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 500 계열은 로그에도 남깁니다. 응답 본문에는 에러 메시지를 그대로 담습니다.
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        // 결과: { "error": "Vous avez déjà voté." }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// `CatchPanicLayer`에서 호출되는 panic → 500 응답 변환기
///
/// panic 페이로드는 보통 `&'static str`(리터럴 메시지) 아니면 `String`(format! 메시지)입니다.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("Unexpected failure: {detail}")).into_response()
}
