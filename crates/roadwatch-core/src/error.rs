//! ROADWATCH 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 외부 라이브러리 에러를 `CoreError`로 매핑해서 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 유효성 검증, 전송 실패 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (자격증명 오류, 토큰 없음 등)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Accident")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 네트워크 에러 (연결 실패, 응답 본문 수신 실패)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 요청 타임아웃
    #[error("요청 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 적용된 타임아웃 (밀리초)
        timeout_ms: u64,
    },

    /// 2xx 이외의 응답
    #[error("API 에러 ({status}): {message}")]
    Api {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 또는 서버 메시지
        message: String,
    },

    /// 업로드할 영상이 선택되지 않음
    #[error("영상이 선택되지 않음")]
    NoFileSelected,

    /// 출동팀이 하나도 선택되지 않음
    #[error("선택된 출동팀 없음")]
    EmptySelection,

    /// 현재 상태에서 허용되지 않는 동작
    #[error("잘못된 상태 전이: {0}")]
    InvalidState(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 전송 계층 실패 여부 (네트워크, 타임아웃, 비정상 응답, 본문 파싱)
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_)
                | CoreError::Timeout { .. }
                | CoreError::Api { .. }
                | CoreError::Serialization(_)
                | CoreError::NotFound { .. }
        )
    }
}
