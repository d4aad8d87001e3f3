//! Cross-crate 에러 경로 테스트.
//!
//! 네트워크 어댑터의 에러가 대시보드 컨트롤러 상태로 전파되는지 검증한다.

use parking_lot::Mutex;
use roadwatch_core::config::{DetailConfig, DispatchConfig, TableConfig};
use roadwatch_core::error::CoreError;
use roadwatch_core::models::auth::Credentials;
use roadwatch_core::models::dispatch::DispatchOutcome;
use roadwatch_core::ports::api_client::AccidentApi;
use roadwatch_core::ports::navigator::Navigator;
use roadwatch_core::ports::notifier::Notifier;
use roadwatch_dashboard::detail::{AccidentDetailView, DetailState, DETAIL_LOAD_FAILURE};
use roadwatch_dashboard::login::{LoginForm, LOGIN_FAILURE};
use roadwatch_dashboard::table::{AccidentTable, LIST_LOAD_FAILURE};
use roadwatch_network::http_client::HttpAccidentApi;
use roadwatch_network::session::SessionContext;
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Recorder {
    messages: Mutex<Vec<String>>,
}

impl Notifier for Recorder {
    fn show_warning(&self, message: &str) {
        self.messages.lock().push(format!("warn:{message}"));
    }
    fn show_error(&self, message: &str) {
        self.messages.lock().push(format!("error:{message}"));
    }
    fn show_success(&self, message: &str) {
        self.messages.lock().push(format!("ok:{message}"));
    }
}

impl Navigator for Recorder {
    fn open_accident(&self, accident_id: &str) {
        self.messages.lock().push(format!("nav:{accident_id}"));
    }
    fn open_dashboard(&self) {
        self.messages.lock().push("nav:dashboard".to_string());
    }
}

fn api(base_url: &str) -> HttpAccidentApi {
    HttpAccidentApi::new(base_url, Duration::from_secs(5), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn unreachable_backend_yields_empty_table() {
    let api = api("http://127.0.0.1:1");
    let mut table = AccidentTable::new(&TableConfig::default());
    table.load(&api).await;

    assert!(table.is_empty());
    assert_eq!(table.page_count(), 1);
    assert_eq!(table.load_error(), Some(LIST_LOAD_FAILURE));
}

#[tokio::test]
async fn malformed_list_body_is_a_serialization_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/accident/all")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = api(&server.url()).list_accidents().await.unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)));
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn missing_accident_fails_detail_view() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/accident/nope")
        .with_status(404)
        .with_body(r#"{"status":"error","message":"Accident not found"}"#)
        .create_async()
        .await;

    let api = api(&server.url());
    let mut view =
        AccidentDetailView::new("nope", &DetailConfig::default(), &DispatchConfig::default());
    view.load(&api).await;

    assert_eq!(
        view.state(),
        &DetailState::Failed(DETAIL_LOAD_FAILURE.to_string())
    );
    assert!(view.map_link().unwrap().is_none());
}

#[tokio::test]
async fn dispatch_server_error_reports_failure() {
    let mut server = mockito::Server::new_async().await;
    let _detail = server
        .mock("GET", "/api/v1/accident/42")
        .with_status(200)
        .with_body(r#"{"data":{"latitude":12.97,"longitude":77.75}}"#)
        .create_async()
        .await;
    let email = server
        .mock("POST", "/api/v1/emails/send-email")
        .with_status(500)
        .with_body(r#"{"status":"error","message":"SMTP down"}"#)
        .expect(1)
        .create_async()
        .await;

    let api = api(&server.url());
    let mut view =
        AccidentDetailView::new("42", &DetailConfig::default(), &DispatchConfig::default());
    view.load(&api).await;
    view.toggle_team("1");

    assert_eq!(view.quick_mail(&api).await, DispatchOutcome::failed());
    email.assert_async().await;
}

#[tokio::test]
async fn login_rejection_surfaces_backend_message() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/api/v1/auth/login")
        .with_status(401)
        .with_body(r#"{"msg":"Bad username or password"}"#)
        .create_async()
        .await;

    let session = Arc::new(SessionContext::new(&server.url()));
    let recorder = Arc::new(Recorder::default());
    let form = LoginForm::new(session.clone(), recorder.clone(), recorder.clone());

    let err = form
        .submit(&Credentials::new("ops@city.gov", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Auth(_)));
    assert_eq!(
        recorder.messages.lock().clone(),
        vec!["error:Bad username or password".to_string()]
    );
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn login_against_unreachable_backend_uses_default_message() {
    let session = Arc::new(SessionContext::new("http://127.0.0.1:1"));
    let recorder = Arc::new(Recorder::default());
    let form = LoginForm::new(session, recorder.clone(), recorder.clone());

    assert!(form
        .submit(&Credentials::new("ops@city.gov", "secret"))
        .await
        .is_err());
    assert_eq!(
        recorder.messages.lock().clone(),
        vec![format!("error:{LOGIN_FAILURE}")]
    );
}
