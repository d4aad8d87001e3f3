//! 콘솔 어댑터.
//!
//! `Navigator`/`Notifier` 포트를 터미널 출력으로 구현한다.
//! 이동 요청은 기록만 하고, 실제 화면 전환은 명령 처리기가 이어서 수행한다.

use parking_lot::Mutex;
use roadwatch_core::ports::navigator::Navigator;
use roadwatch_core::ports::notifier::Notifier;
use tracing::debug;

/// 마지막 이동 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Accident(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Accident(id) => format!("/dashboard/accident/{id}"),
        }
    }
}

/// 이동 요청을 보관하는 콘솔 라우터
#[derive(Default)]
pub struct ConsoleNavigator {
    pending: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    /// 보관된 이동 요청을 꺼낸다
    pub fn take(&self) -> Option<Route> {
        self.pending.lock().take()
    }
}

impl Navigator for ConsoleNavigator {
    fn open_accident(&self, accident_id: &str) {
        let route = Route::Accident(accident_id.to_string());
        debug!("이동 요청: {}", route.path());
        *self.pending.lock() = Some(route);
    }

    fn open_dashboard(&self) {
        debug!("이동 요청: /dashboard");
        *self.pending.lock() = Some(Route::Dashboard);
    }
}

/// 터미널 알림
#[derive(Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_warning(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }

    fn show_error(&self, message: &str) {
        eprintln!("❌ {message}");
    }

    fn show_success(&self, message: &str) {
        println!("✅ {message}");
    }
}
