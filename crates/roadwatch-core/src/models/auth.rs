//! 로그인 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 로그인 실패 기본 문구 (서버 메시지가 없을 때)
pub const LOGIN_FAILURE: &str = "Invalid email or password";

/// 로그인 폼 입력값
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// 필드 검증. 첫 번째 실패 필드를 반환한다.
    pub fn validate(&self) -> Result<(), CoreError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(CoreError::Validation {
                field: "email".to_string(),
                message: "Email is required".to_string(),
            });
        }
        if !is_plausible_email(email) {
            return Err(CoreError::Validation {
                field: "email".to_string(),
                message: "Invalid email address".to_string(),
            });
        }
        if self.password.is_empty() {
            return Err(CoreError::Validation {
                field: "password".to_string(),
                message: "Password is required".to_string(),
            });
        }
        Ok(())
    }

    /// 서버 요청 바디로 변환 (email은 `username` 필드로 전송)
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// `local@domain.tld` 형태인지 (공백 없음, '@' 하나, 도메인에 '.')
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// 로그인 요청 (`POST /api/v1/auth/login`)
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 로그인 응답. 실패 시에는 `msg`만 온다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// 클라이언트에 보관하는 세션 토큰
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
