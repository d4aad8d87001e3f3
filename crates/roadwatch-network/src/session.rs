//! 로그인 세션 컨텍스트.
//!
//! 서버 로그인, 토큰 보관(기본 1일), 세션 파일 저장/복원을 담당한다.
//! 전역 상태를 두지 않고 필요한 곳에 `Arc<SessionContext>`로 전달한다.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use roadwatch_core::error::CoreError;
use roadwatch_core::models::auth::{Credentials, LoginResponse, StoredToken, LOGIN_FAILURE};
use roadwatch_core::ports::authenticator::Authenticator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// 로그인 요청 기본 타임아웃
const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// 세션 컨텍스트 — 로그인/토큰 보관/영속화
#[derive(Clone)]
pub struct SessionContext {
    base_url: String,
    client: reqwest::Client,
    state: Arc<RwLock<Option<StoredToken>>>,
    max_age: Duration,
    request_timeout: std::time::Duration,
    store_path: Option<PathBuf>,
}

impl SessionContext {
    /// 새 세션 컨텍스트 생성 (토큰 보관 1일, 파일 저장 없음)
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            state: Arc::new(RwLock::new(None)),
            max_age: Duration::days(1),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            store_path: None,
        }
    }

    /// 로그인 요청 타임아웃 설정
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// 토큰 보관 기간 설정
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// 세션 파일 경로 설정
    pub fn with_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    /// 세션 파일에서 토큰 복원.
    ///
    /// 파일이 없거나 만료된 토큰이면 `false`. 만료된 파일은 삭제한다.
    pub async fn restore(&self) -> Result<bool, CoreError> {
        let Some(path) = &self.store_path else {
            return Ok(false);
        };
        if !tokio::fs::try_exists(path).await? {
            return Ok(false);
        }

        let content = tokio::fs::read_to_string(path).await?;
        let token: StoredToken = match serde_json::from_str(&content) {
            Ok(token) => token,
            Err(e) => {
                warn!("세션 파일 파싱 실패, 무시: {}: {e}", path.display());
                return Ok(false);
            }
        };

        if token.is_expired() {
            debug!("세션 토큰 만료: {}", token.expires_at);
            tokio::fs::remove_file(path).await?;
            return Ok(false);
        }

        *self.state.write().await = Some(token);
        debug!("세션 복원 완료: {}", path.display());
        Ok(true)
    }

    /// 유효한 액세스 토큰 (없거나 만료되면 None)
    pub async fn token(&self) -> Option<String> {
        let state = self.state.read().await;
        state
            .as_ref()
            .filter(|t| !t.is_expired())
            .map(|t| t.access_token.clone())
    }

    /// 현재 인증 상태 확인
    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }

    async fn persist(&self, token: &StoredToken) -> Result<(), CoreError> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(token)?;
        tokio::fs::write(path, content).await?;
        debug!("세션 저장: {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl Authenticator for SessionContext {
    async fn login(&self, credentials: &Credentials) -> Result<bool, CoreError> {
        let url = format!("{}/api/v1/auth/login", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&credentials.to_request())
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("로그인 요청 타임아웃 ({:?})", self.request_timeout);
                    CoreError::Timeout {
                        timeout_ms: self.request_timeout.as_millis() as u64,
                    }
                } else {
                    CoreError::Network(format!("로그인 요청 실패: {e}"))
                }
            })?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("로그인 응답 본문 읽기 실패: {e}");
            String::new()
        });
        let body: LoginResponse = serde_json::from_str(&text).unwrap_or_default();

        if !status.is_success() {
            warn!("로그인 실패 ({status})");
            let message = body
                .msg
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| LOGIN_FAILURE.to_string());
            return Err(CoreError::Auth(message));
        }

        let Some(access_token) = body.access_token else {
            info!("로그인 성공 (토큰 없음, 서버 쿠키 세션)");
            return Ok(false);
        };

        let token = StoredToken {
            access_token,
            expires_at: Utc::now() + self.max_age,
        };
        self.persist(&token).await?;
        debug!("로그인 성공, 토큰 만료: {}", token.expires_at);
        *self.state.write().await = Some(token);
        Ok(true)
    }

    async fn logout(&self) -> Result<(), CoreError> {
        *self.state.write().await = None;
        if let Some(path) = &self.store_path {
            if tokio::fs::try_exists(path).await? {
                tokio::fs::remove_file(path).await?;
            }
        }
        debug!("로그아웃 완료");
        Ok(())
    }
}
