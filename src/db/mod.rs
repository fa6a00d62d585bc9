//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 문서 저장소와 직접 상호작용하는 코드를 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)는 이 모듈의 함수만 호출합니다.
//!
//! 각 하위 모듈:
//! - `store`: 문서 저장소 클라이언트 (`DocumentStore`, `Collection`, `StoreError`)
//! - `users`: `user` 컬렉션 조회/삽입
//! - `votes`: `vote` 컬렉션 조회/삽입/목록

pub mod store;
pub mod users;
pub mod votes;

pub use store::{Collection, DocumentStore, StoreError};
pub use users::*;
pub use votes::*;
