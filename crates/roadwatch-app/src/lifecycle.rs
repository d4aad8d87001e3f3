//! 라이프사이클 관리.
//!
//! 명령 실행 중 종료 시그널(Ctrl+C, SIGTERM)을 받으면 진행 중인 작업을 버린다.

use std::future::Future;
use tokio::sync::watch;
use tracing::{info, warn};

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    /// OS 시그널 대기 (SIGINT, SIGTERM)
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match (
                signal(SignalKind::interrupt()),
                signal(SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => info!("SIGINT 수신"),
                        _ = sigterm.recv() => info!("SIGTERM 수신"),
                    }
                }
                _ => {
                    warn!("시그널 핸들러 등록 실패, Ctrl+C만 대기");
                    if tokio::signal::ctrl_c().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Ctrl+C 핸들러 등록 실패: {e}");
                std::future::pending::<()>().await;
            }
            info!("Ctrl+C 수신");
        }

        self.shutdown();
    }

    /// 작업을 실행하되 종료 신호가 오면 중단한다. 중단되면 `None`.
    pub async fn run_until_shutdown<F, T>(&self, task: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let mut rx = self.subscribe();
        if *rx.borrow() {
            return None;
        }
        tokio::select! {
            output = task => Some(output),
            _ = rx.changed() => {
                warn!("종료 요청으로 작업 중단");
                None
            }
            _ = self.wait_for_signal() => {
                warn!("종료 시그널로 작업 중단");
                None
            }
        }
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
