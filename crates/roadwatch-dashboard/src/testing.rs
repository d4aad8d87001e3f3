//! 컨트롤러 테스트용 목 포트.

use async_trait::async_trait;
use parking_lot::Mutex;
use roadwatch_core::error::CoreError;
use roadwatch_core::models::accident::{AccidentDetail, AccidentRecord, MonthlyCount};
use roadwatch_core::models::analysis::AnalysisResult;
use roadwatch_core::models::auth::Credentials;
use roadwatch_core::models::dispatch::EmailDispatchRequest;
use roadwatch_core::models::video::VideoFile;
use roadwatch_core::ports::api_client::AccidentApi;
use roadwatch_core::ports::authenticator::Authenticator;
use roadwatch_core::ports::navigator::Navigator;
use roadwatch_core::ports::notifier::Notifier;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 목 응답: JSON 본문, 전송 실패 또는 타임아웃
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Json(&'static str),
    Fail,
    Timeout,
}

impl Reply {
    fn decode<T: DeserializeOwned>(self) -> Result<T, CoreError> {
        match self {
            Reply::Json(body) => Ok(serde_json::from_str(body)?),
            Reply::Fail => Err(CoreError::Network("connection refused".to_string())),
            Reply::Timeout => Err(CoreError::Timeout {
                timeout_ms: 300_000,
            }),
        }
    }
}

/// 호출 횟수를 세는 목 API
pub struct MockApi {
    upload: Reply,
    accidents: Reply,
    detail: Reply,
    dispatch: Reply,
    upload_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    dispatched: Mutex<Vec<EmailDispatchRequest>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            upload: Reply::Fail,
            accidents: Reply::Fail,
            detail: Reply::Fail,
            dispatch: Reply::Fail,
            upload_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            dispatched: Mutex::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn with_upload(reply: Reply) -> Self {
        Self {
            upload: reply,
            ..Self::default()
        }
    }

    pub fn accidents(mut self, reply: Reply) -> Self {
        self.accidents = reply;
        self
    }

    /// 단건 응답 (`"null"`이면 데이터 없음)
    pub fn detail(mut self, reply: Reply) -> Self {
        self.detail = reply;
        self
    }

    pub fn dispatch(mut self, reply: Reply) -> Self {
        self.dispatch = reply;
        self
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn dispatched(&self) -> Vec<EmailDispatchRequest> {
        self.dispatched.lock().clone()
    }
}

#[async_trait]
impl AccidentApi for MockApi {
    async fn upload_video(&self, _video: &VideoFile) -> Result<AnalysisResult, CoreError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.upload.decode()
    }

    fn video_url(&self, video_id: &str) -> String {
        format!("http://backend.test/api/v1/public/video/{video_id}")
    }

    async fn list_accidents(&self) -> Result<Vec<AccidentRecord>, CoreError> {
        self.accidents.decode()
    }

    async fn get_accident(&self, _accident_id: &str) -> Result<Option<AccidentDetail>, CoreError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail.decode()
    }

    async fn monthly_summary(&self) -> Result<Vec<MonthlyCount>, CoreError> {
        Ok(Vec::new())
    }

    async fn send_dispatch_email(&self, request: &EmailDispatchRequest) -> Result<(), CoreError> {
        self.dispatched.lock().push(request.clone());
        match self.dispatch {
            Reply::Json(_) => Ok(()),
            Reply::Fail | Reply::Timeout => Err(CoreError::Api {
                status: 500,
                message: "smtp down".to_string(),
            }),
        }
    }
}

/// 이동 요청을 기록하는 내비게이터
#[derive(Default)]
pub struct RecordingNavigator {
    accidents: Mutex<Vec<String>>,
    dashboard: AtomicUsize,
}

impl RecordingNavigator {
    pub fn accidents(&self) -> Vec<String> {
        self.accidents.lock().clone()
    }

    pub fn dashboard_visits(&self) -> usize {
        self.dashboard.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn open_accident(&self, accident_id: &str) {
        self.accidents.lock().push(accident_id.to_string());
    }

    fn open_dashboard(&self) {
        self.dashboard.fetch_add(1, Ordering::SeqCst);
    }
}

/// 표시된 메시지를 기록하는 알림기
#[derive(Default)]
pub struct RecordingNotifier {
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_warning(&self, message: &str) {
        self.warnings.lock().push(message.to_string());
    }

    fn show_error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn show_success(&self, message: &str) {
        self.successes.lock().push(message.to_string());
    }
}

/// 미리 정한 결과를 돌려주는 인증기
pub struct StubAuthenticator {
    outcome: Mutex<Option<Result<bool, CoreError>>>,
    calls: AtomicUsize,
}

impl StubAuthenticator {
    pub fn new(outcome: Result<bool, CoreError>) -> Self {
        Self {
            outcome: Mutex::new(Some(outcome)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn login(&self, _credentials: &Credentials) -> Result<bool, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .lock()
            .take()
            .unwrap_or_else(|| Err(CoreError::Internal("응답 소진".to_string())))
    }

    async fn logout(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
