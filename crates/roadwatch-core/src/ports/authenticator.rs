//! 로그인 포트.
//!
//! 구현: `roadwatch-network::session::SessionContext`

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::auth::Credentials;

/// 자격증명으로 세션을 여는 인증기
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// 로그인. 서버가 토큰을 내려주면 보관하고 `true`를 반환한다.
    async fn login(&self, credentials: &Credentials) -> Result<bool, CoreError>;

    /// 세션 종료 (보관된 토큰 삭제)
    async fn logout(&self) -> Result<(), CoreError>;
}
