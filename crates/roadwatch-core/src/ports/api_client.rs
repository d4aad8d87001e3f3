//! 백엔드 API 클라이언트 포트.
//!
//! 구현: `roadwatch-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::accident::{AccidentDetail, AccidentRecord, MonthlyCount};
use crate::models::analysis::AnalysisResult;
use crate::models::dispatch::EmailDispatchRequest;
use crate::models::video::VideoFile;

/// 사고 탐지 백엔드 API
#[async_trait]
pub trait AccidentApi: Send + Sync {
    /// 영상 업로드 + 분석 (multipart 필드 `video`)
    ///
    /// 호출 1회당 정확히 한 번 요청하며 재시도하지 않는다.
    async fn upload_video(&self, video: &VideoFile) -> Result<AnalysisResult, CoreError>;

    /// 업로드 응답의 영상 식별자로 재생 URL 생성
    fn video_url(&self, video_id: &str) -> String;

    /// 사고 목록 (서버 정렬: 최신순)
    async fn list_accidents(&self) -> Result<Vec<AccidentRecord>, CoreError>;

    /// 사고 단건 조회. 응답에 `data`가 없으면 `None`.
    async fn get_accident(&self, accident_id: &str) -> Result<Option<AccidentDetail>, CoreError>;

    /// 월별 사고 건수
    async fn monthly_summary(&self) -> Result<Vec<MonthlyCount>, CoreError>;

    /// 출동팀 긴급 메일 발송
    async fn send_dispatch_email(&self, request: &EmailDispatchRequest) -> Result<(), CoreError>;
}
