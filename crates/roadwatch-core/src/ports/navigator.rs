//! 화면 이동 포트.
//!
//! 구현: `roadwatch-app` (콘솔 라우터)

/// 외부 화면으로의 이동
pub trait Navigator: Send + Sync {
    /// 사고 상세 화면 (`/dashboard/accident/{id}`)
    fn open_accident(&self, accident_id: &str);

    /// 대시보드 목록 화면 (`/dashboard`)
    fn open_dashboard(&self);
}
