//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /postUser | `post_user` | 사용자 등록 (이미 있으면 기존 문서 반환) |
//! | POST | /vote | `vote` | 투표 (이메일당 한 번) |
//! | GET | /hasVoted?email= | `has_voted` | 투표 여부 확인 |
//! | GET | /listVotes | `list_votes` | 전체 투표 목록 |
//! | GET | /health | `health_check` | 서버/저장소 상태 확인 |
//!
//! 각 하위 모듈:
//! - `health`: 헬스체크
//! - `users`: 사용자 등록
//! - `votes`: 투표, 투표 여부, 투표 목록

pub mod health;
pub mod users;
pub mod votes;

pub use health::*;
pub use users::*;
pub use votes::*;

use crate::{db::DocumentStore, error::handle_panic};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,   // 핸들러 panic → 500 JSON 응답
    cors::{Any, CorsLayer},         // CORS 설정
    trace::TraceLayer,              // HTTP 요청/응답 자동 로깅
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 저장소 클라이언트는 `main`에서 만들어 여기로 주입되며, 전역 변수는 없습니다.
#[derive(Clone)]
pub struct AppState {
    /// 문서 저장소 클라이언트 (내부적으로 연결 풀을 공유)
    pub store: DocumentStore,
}

/// 전체 라우터를 구성합니다.
///
/// `main`과 테스트가 같은 라우터를 사용합니다.
pub fn router(state: AppState) -> Router {
    // 인증이 없는 공개 API이고 브라우저 프런트엔드가 직접 호출하므로 모두 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/postUser", post(post_user))
        .route("/vote", post(vote))
        .route("/hasVoted", get(has_voted))
        .route("/listVotes", get(list_votes))
        .route("/health", get(health_check))
        .with_state(state)
        // .layer(): 나중에 추가한 레이어가 바깥쪽에서 요청을 먼저 받습니다.
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// 값이 없거나 빈 문자열이면 None으로 취급합니다.
///
/// `{"email": ""}`는 `{}`와 똑같이 "누락"입니다.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
