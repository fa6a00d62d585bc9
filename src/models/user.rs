//! # 사용자 모델 정의
//!
//! 사용자는 이메일 하나로 식별됩니다. 문서의 `id`가 곧 이메일이므로
//! 같은 이메일로 두 번 저장하면 저장소의 키 충돌로 거부됩니다.

use serde::{Deserialize, Serialize};

/// 사용자 문서 — `user` 컬렉션의 문서 하나에 대응합니다.
///
/// 한 번 만들어지면 이 서버에서는 수정하거나 삭제하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// 문서 키. 항상 `email`과 같은 값입니다.
    pub id: String,
    /// 사용자 이메일
    pub email: String,
}

impl User {
    /// 이메일로 새 사용자 문서를 만듭니다 (`id == email`).
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            id: email.clone(),
            email,
        }
    }
}

/// 사용자 등록 요청 — `POST /postUser`의 요청 본문
///
/// 필드가 Option인 이유: 누락된 필드를 JSON 파싱 에러가 아니라
/// 핸들러의 검증 에러(400, 정해진 메시지)로 처리하기 위해서입니다.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub email: Option<String>,
}
