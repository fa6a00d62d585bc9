//! # 데이터 모델 모듈
//!
//! 문서 저장소에 저장되는 문서와 HTTP 요청/응답 구조체를 정의합니다.
//! - `user`: 사용자(User) 문서와 등록 요청
//! - `vote`: 투표(Vote) 문서, 선택지(Choice), 목록 프로젝션, 요청/쿼리 구조체
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Vote`처럼 짧게 접근합니다.

pub mod user;
pub mod vote;

pub use user::*;
pub use vote::*;
