//! 로그인 폼 컨트롤러.

use roadwatch_core::error::CoreError;
use roadwatch_core::models::auth::Credentials;
pub use roadwatch_core::models::auth::LOGIN_FAILURE;
use roadwatch_core::ports::authenticator::Authenticator;
use roadwatch_core::ports::navigator::Navigator;
use roadwatch_core::ports::notifier::Notifier;
use std::sync::Arc;
use tracing::{info, warn};

/// 로그인 성공 문구
pub const LOGIN_SUCCESS: &str = "Logged in successfully!";

/// 로그인 폼
pub struct LoginForm {
    authenticator: Arc<dyn Authenticator>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl LoginForm {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            authenticator,
            navigator,
            notifier,
        }
    }

    /// 검증 후 로그인. 성공하면 대시보드로 이동한다.
    ///
    /// 필드 검증 실패는 요청 없이 `Validation`으로 반환한다 (폼 필드 아래 표시).
    pub async fn submit(&self, credentials: &Credentials) -> Result<(), CoreError> {
        credentials.validate()?;

        match self.authenticator.login(credentials).await {
            Ok(token_stored) => {
                info!("로그인 성공 (토큰 저장: {token_stored})");
                self.notifier.show_success(LOGIN_SUCCESS);
                self.navigator.open_dashboard();
                Ok(())
            }
            Err(CoreError::Auth(message)) => {
                warn!("로그인 거부: {message}");
                self.notifier.show_error(&message);
                Err(CoreError::Auth(message))
            }
            Err(e) => {
                warn!("로그인 실패: {e}");
                self.notifier.show_error(LOGIN_FAILURE);
                Err(e)
            }
        }
    }
}
