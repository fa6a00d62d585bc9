//! # 투표 백엔드 서버 진입점
//!
//! 이메일로 사용자를 등록하고, 이메일당 한 번 투표를 받고,
//! 투표 여부와 투표 목록을 조회하는 HTTP 서버입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 읽기
//! 4. 문서 저장소 열기 (컬렉션 자동 생성)
//! 5. 라우터 구성
//! 6. HTTP 서버 시작, 종료 시그널을 받으면 정리 후 종료

mod config;
mod db;
mod error;
mod models;
mod routes;

use anyhow::Result;
use config::Config;
use db::DocumentStore;
use routes::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 이 크레이트와 HTTP 계층을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bayrou_vote=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting bayrou-vote server on {}:{}", config.host, config.port);

    // 저장소 클라이언트는 여기서 한 번 만들고 AppState로 주입합니다.
    // 프로세스 전역 변수로 두지 않습니다.
    let store = DocumentStore::open(&config.database_url, config.max_connections).await?;
    tracing::info!("Document store ready ({} collections)", db::Collection::ALL.len());

    let app = routes::router(AppState {
        store: store.clone(),
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // with_graceful_shutdown: 시그널을 받으면 새 연결을 멈추고 진행 중인 요청을 마무리합니다.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Ctrl-C 또는 (유닉스에서) SIGTERM을 기다립니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // 리스너 설치에 실패했다고 바로 종료하지 않고, 다른 시그널을 기다립니다.
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    // 유닉스가 아니면 끝나지 않는 future로 대신합니다.
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
