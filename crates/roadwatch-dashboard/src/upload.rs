//! 영상 업로드/분석 결과 상태 머신.
//!
//! `Idle → Processing → Resulted | Error → (reset) → Idle`
//!
//! - 새 제출은 `Idle`에서만 시작한다. `Processing` 중 재제출은 요청 없이 거부된다.
//! - `Resulted`/`Error`는 `Processing`에서만 도달한다.
//! - 전송 실패, 2xx 이외 응답, `status != "success"`는 모두 `Error`로 매핑하고
//!   사용자에게는 일반 실패 문구만 보여준다.

use roadwatch_core::error::CoreError;
use roadwatch_core::models::analysis::{AnalysisResult, Verdict};
use roadwatch_core::models::video::VideoFile;
use roadwatch_core::ports::api_client::AccidentApi;
use roadwatch_core::ports::navigator::Navigator;
use roadwatch_core::ports::notifier::Notifier;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::display::format_number;

/// 파일 미선택 경고 문구
pub const NO_FILE_WARNING: &str = "Please select a video first";
/// 빈 파일 선택 경고 문구
pub const EMPTY_FILE_WARNING: &str = "Selected video is empty";
/// 처리 실패 문구
pub const FAILURE_NOTICE: &str = "Video processing failed";
/// 처리 중 안내 문구
pub const PROCESSING_NOTICE: &str =
    "Processing video... Please wait while we analyze the footage.";

/// 업로드 화면 상태
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    Processing,
    Resulted(AnalysisResult),
    Error,
}

/// 업로드/결과 라이프사이클 컨트롤러
pub struct UploadController {
    api: Arc<dyn AccidentApi>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: UploadState,
    selected: Option<VideoFile>,
    preview_url: Option<String>,
    video_url: Option<String>,
}

impl UploadController {
    pub fn new(
        api: Arc<dyn AccidentApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            navigator,
            notifier,
            state: UploadState::Idle,
            selected: None,
            preview_url: None,
            video_url: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state == UploadState::Processing
    }

    /// `Resulted` 상태의 분석 결과
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            UploadState::Resulted(result) => Some(result),
            _ => None,
        }
    }

    /// 서버 재생 URL (분석 성공 후에만)
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    /// 로컬 미리보기 참조
    pub fn preview_url(&self) -> Option<&str> {
        self.preview_url.as_deref()
    }

    pub fn selected_video(&self) -> Option<&VideoFile> {
        self.selected.as_ref()
    }

    /// 업로드 폼 표시 여부 (재생 URL이 없고 처리 중이 아닐 때)
    pub fn shows_upload_form(&self) -> bool {
        self.video_url.is_none() && !self.is_processing()
    }

    /// 파일 선택. `Idle`이 아니거나 빈 파일이면 무시하고 `false`.
    pub fn select_video(&mut self, file: VideoFile) -> bool {
        if self.state != UploadState::Idle {
            debug!("Idle 아님, 파일 선택 무시: {:?}", self.state);
            return false;
        }
        if file.is_empty() {
            self.notifier.show_warning(EMPTY_FILE_WARNING);
            return false;
        }

        self.preview_url = Some(file.preview_url());
        debug!("영상 선택: {} ({} bytes)", file.file_name(), file.len());
        self.selected = Some(file);
        true
    }

    /// 제출 시작: `Idle → Processing` 전이 후 업로드할 파일을 반환한다.
    ///
    /// 파일이 없으면 경고만 표시하고 `Idle`을 유지한다.
    pub fn begin_submit(&mut self) -> Result<VideoFile, CoreError> {
        if self.state != UploadState::Idle {
            warn!("제출 거부 — 현재 상태: {:?}", self.state);
            return Err(CoreError::InvalidState(format!(
                "{:?} 상태에서는 제출할 수 없음",
                self.state
            )));
        }

        let Some(file) = self.selected.clone() else {
            self.notifier.show_warning(NO_FILE_WARNING);
            return Err(CoreError::NoFileSelected);
        };

        self.state = UploadState::Processing;
        info!("영상 분석 요청: {}", file.file_name());
        Ok(file)
    }

    /// 제출 완료: 업로드 응답으로 `Processing → Resulted | Error` 전이
    pub fn finish_submit(&mut self, outcome: Result<AnalysisResult, CoreError>) {
        if self.state != UploadState::Processing {
            // reset 이후 도착한 응답은 버린다
            debug!("처리 중 아님, 응답 폐기: {:?}", self.state);
            return;
        }

        match outcome {
            Ok(result) if result.is_success() => {
                self.video_url = match result.video.as_deref() {
                    Some(video_id) => Some(self.api.video_url(video_id)),
                    None => {
                        warn!("성공 응답에 영상 식별자 없음");
                        None
                    }
                };
                info!(
                    "분석 완료: {:?}, accident_id={:?}",
                    result.analysis.as_ref().map(|a| a.result),
                    result.accident_id
                );
                self.state = UploadState::Resulted(result);
            }
            Ok(result) => {
                warn!(
                    "분석 실패 응답: status={:?}, message={:?}",
                    result.status, result.message
                );
                self.fail();
            }
            Err(e) if e.is_transport_failure() => {
                warn!("영상 업로드 실패: {e}");
                self.fail();
            }
            Err(e) => {
                error!("영상 업로드 처리 오류: {e}");
                self.fail();
            }
        }
    }

    fn fail(&mut self) {
        self.video_url = None;
        self.state = UploadState::Error;
        self.notifier.show_error(FAILURE_NOTICE);
    }

    /// 제출: 업로드 요청 1회 후 결과 상태로 전이.
    ///
    /// 입력 거부(`NoFileSelected`, `InvalidState`)만 `Err`로 반환하고
    /// 전송 실패는 `Error` 상태로 흡수한다.
    pub async fn submit(&mut self) -> Result<(), CoreError> {
        let file = self.begin_submit()?;
        let outcome = self.api.upload_video(&file).await;
        self.finish_submit(outcome);
        Ok(())
    }

    /// 모든 파생 상태를 지우고 `Idle`로 복귀 (어느 상태에서든)
    pub fn reset(&mut self) {
        self.selected = None;
        self.preview_url = None;
        self.video_url = None;
        self.state = UploadState::Idle;
        debug!("업로드 화면 초기화");
    }

    /// 사고 상세 이동 버튼 제공 여부
    pub fn can_view_accident_details(&self) -> bool {
        self.result()
            .and_then(AnalysisResult::accident_target)
            .is_some()
    }

    /// 사고 상세 화면으로 이동. 조건이 맞지 않으면 아무것도 하지 않고 `false`.
    pub fn view_accident_details(&self) -> bool {
        match self.result().and_then(AnalysisResult::accident_target) {
            Some(accident_id) => {
                self.navigator.open_accident(accident_id);
                true
            }
            None => false,
        }
    }

    /// 대시보드 이동 (결과/에러 화면에서만)
    pub fn go_to_dashboard(&self) -> bool {
        match self.state {
            UploadState::Resulted(_) | UploadState::Error => {
                self.navigator.open_dashboard();
                true
            }
            _ => false,
        }
    }

    /// 현재 상태의 안내 문구
    pub fn status_banner(&self) -> Option<String> {
        match &self.state {
            UploadState::Idle => None,
            UploadState::Processing => Some(PROCESSING_NOTICE.to_string()),
            UploadState::Error => Some(FAILURE_NOTICE.to_string()),
            UploadState::Resulted(result) => match &result.analysis {
                Some(analysis) if analysis.result == Verdict::Accident => {
                    let severity = analysis.severity.as_deref().unwrap_or("Unknown");
                    let percent = analysis
                        .severity_in_percentage
                        .map(format_number)
                        .unwrap_or_else(|| "?".to_string());
                    Some(format!("Accident detected! Severity: {severity} ({percent}%)"))
                }
                Some(_) => {
                    Some("No accident detected. Traffic conditions appear normal.".to_string())
                }
                None => Some("Analysis complete.".to_string()),
            },
        }
    }
}
