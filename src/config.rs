//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: 문서 저장소(SQLite) 연결 문자열
//! - `DATABASE_MAX_CONNECTIONS`: 연결 풀 최대 크기
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//!
//! 데이터베이스 이름(`bayroudb`)과 컬렉션 이름(`user`, `vote`)은
//! 설정이 아니라 고정 상수입니다.

use std::env;

/// 논리 데이터베이스 이름. 기본 연결 문자열의 파일 이름으로 쓰입니다.
pub const DATABASE_NAME: &str = "bayroudb";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 7071;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `main`에서만 사용합니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 문서 저장소 연결 문자열 (예: "sqlite:bayroudb.db")
    pub database_url: String,
    /// 연결 풀이 유지할 최대 연결 수
    pub max_connections: u32,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 7071)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 실패하지 않습니다.
    /// 숫자 항목을 파싱할 수 없으면 경고를 남기고 기본값을 사용합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다.
    ///
    /// `from_env`는 `std::env::var`를 넘기고, 테스트는 HashMap 조회를 넘깁니다.
    /// 프로세스 전역 환경변수를 테스트에서 건드리지 않기 위한 분리입니다.
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| format!("sqlite:{DATABASE_NAME}.db")),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            ),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT),
        }
    }
}

/// 문자열 값을 `T`로 파싱하고, 값이 없거나 잘못되었으면 기본값을 돌려줍니다.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        // str::parse::<T>(): 제네릭 타입 T로 문자열 변환
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {key} value {value:?}, using default: {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, "sqlite:bayroudb.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7071);
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "http"), ("DATABASE_MAX_CONNECTIONS", "-1")]);
        assert_eq!(config.port, 7071);
        assert_eq!(config.max_connections, 5);
    }
}
