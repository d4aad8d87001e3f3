//! 사용자 알림 포트.
//!
//! 구현: `roadwatch-app` (콘솔 출력)

/// 사용자에게 보이는 경고/에러/성공 메시지
pub trait Notifier: Send + Sync {
    /// 경고 (상태 전이 없는 입력 오류 등)
    fn show_warning(&self, message: &str);

    /// 에러
    fn show_error(&self, message: &str);

    /// 성공
    fn show_success(&self, message: &str);
}
