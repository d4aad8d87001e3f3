//! HTTP REST API 클라이언트.
//!
//! `AccidentApi` 포트 구현. 세션 토큰이 있으면 Authorization 헤더를 붙인다.
//! 업로드는 분석이 끝나야 응답이 오므로 별도의 긴 타임아웃을 쓰고, 재시도하지 않는다.

use async_trait::async_trait;
use roadwatch_core::error::CoreError;
use roadwatch_core::models::accident::{
    AccidentDetail, AccidentDetailResponse, AccidentListResponse, AccidentRecord, MonthlyCount,
};
use roadwatch_core::models::analysis::AnalysisResult;
use roadwatch_core::models::dispatch::EmailDispatchRequest;
use roadwatch_core::models::video::VideoFile;
use roadwatch_core::ports::api_client::AccidentApi;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::session::SessionContext;

/// 업로드 엔드포인트
const UPLOAD_PATH: &str = "/api/v1/public/upload-video";
/// 사고 목록 엔드포인트
const ACCIDENT_LIST_PATH: &str = "/api/v1/accident/all";
/// 월별 요약 엔드포인트
const ACCIDENT_SUMMARY_PATH: &str = "/api/v1/accident/summary";
/// 긴급 메일 엔드포인트
const SEND_EMAIL_PATH: &str = "/api/v1/emails/send-email";

/// REST API 클라이언트 — `AccidentApi` 포트 구현
pub struct HttpAccidentApi {
    client: reqwest::Client,
    base_url: String,
    session: Option<Arc<SessionContext>>,
    request_timeout: Duration,
    upload_timeout: Duration,
}

impl HttpAccidentApi {
    /// 새 HTTP API 클라이언트 생성
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        upload_timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
            request_timeout,
            upload_timeout,
        })
    }

    /// 세션 컨텍스트 연결 (토큰이 있으면 bearer 인증)
    pub fn with_session(mut self, session: Arc<SessionContext>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 경로 세그먼트를 각각 인코딩해 전체 URL 구성
    fn endpoint(&self, segments: &[&str]) -> String {
        match url::Url::parse(&self.base_url) {
            Ok(mut url) if !url.cannot_be_a_base() => {
                if let Ok(mut path) = url.path_segments_mut() {
                    path.pop_if_empty().extend(segments);
                }
                url.to_string()
            }
            _ => format!("{}/{}", self.base_url, segments.join("/")),
        }
    }

    /// 고정 경로 상수 → 전체 URL
    fn route(&self, path: &str) -> String {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        self.endpoint(&segments)
    }

    /// 요청 빌더 반환 (타임아웃 + 선택적 인증 헤더)
    async fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        timeout: Duration,
    ) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url).timeout(timeout);

        match &self.session {
            Some(session) => match session.token().await {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
            None => builder,
        }
    }

    /// 전송 에러 매핑 (타임아웃 구분)
    fn send_error(context: &str, timeout: Duration, e: reqwest::Error) -> CoreError {
        if e.is_timeout() {
            warn!("{context} 타임아웃 ({timeout:?})");
            CoreError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }
        } else {
            CoreError::Network(format!("{context} 실패: {e}"))
        }
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(
        &self,
        resp: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let status_code = status.as_u16();
        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });
        debug!("API 에러 응답 ({status}) {path}: {text}");

        match status_code {
            401 => Err(CoreError::Auth(format!("인증 실패: {text}"))),
            404 => Err(CoreError::NotFound {
                resource_type: "API".to_string(),
                id: path.to_string(),
            }),
            _ => Err(CoreError::Api {
                status: status_code,
                message: text,
            }),
        }
    }

    /// 응답 본문을 JSON으로 디코딩
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, CoreError> {
        let text = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("응답 본문 수신 실패: {e}")))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET + JSON 디코딩 공통 로직 (`path`는 에러 표시용)
    async fn get_json<T: DeserializeOwned>(&self, url: &str, path: &str) -> Result<T, CoreError> {
        let resp = self
            .request(reqwest::Method::GET, url, self.request_timeout)
            .await
            .send()
            .await
            .map_err(|e| Self::send_error("조회 요청", self.request_timeout, e))?;

        let resp = self.check_response(resp, path).await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl AccidentApi for HttpAccidentApi {
    async fn upload_video(&self, video: &VideoFile) -> Result<AnalysisResult, CoreError> {
        debug!(
            "영상 업로드: {} ({} bytes, {})",
            video.file_name(),
            video.len(),
            video.mime_type()
        );

        let part = reqwest::multipart::Part::bytes(video.bytes().to_vec())
            .file_name(video.file_name().to_string())
            .mime_str(video.mime_type())
            .map_err(|e| CoreError::Internal(format!("MIME 타입 설정 실패: {e}")))?;
        let form = reqwest::multipart::Form::new().part("video", part);

        let resp = self
            .request(
                reqwest::Method::POST,
                &self.route(UPLOAD_PATH),
                self.upload_timeout,
            )
            .await
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::send_error("영상 업로드", self.upload_timeout, e))?;

        let resp = self.check_response(resp, UPLOAD_PATH).await?;
        let result: AnalysisResult = Self::decode(resp).await?;
        debug!(
            "업로드 응답: status={:?}, video={:?}, accident_id={:?}",
            result.status, result.video, result.accident_id
        );
        Ok(result)
    }

    fn video_url(&self, video_id: &str) -> String {
        self.endpoint(&["api", "v1", "public", "video", video_id])
    }

    async fn list_accidents(&self) -> Result<Vec<AccidentRecord>, CoreError> {
        let resp: AccidentListResponse = self
            .get_json(&self.route(ACCIDENT_LIST_PATH), ACCIDENT_LIST_PATH)
            .await?;
        debug!("사고 목록 수신: {}건", resp.datas.len());
        Ok(resp.datas)
    }

    async fn get_accident(&self, accident_id: &str) -> Result<Option<AccidentDetail>, CoreError> {
        let id = accident_id.trim();
        if id.is_empty() || id == "." || id == ".." {
            return Err(CoreError::Validation {
                field: "accident_id".to_string(),
                message: format!("잘못된 사고 ID: {accident_id:?}"),
            });
        }

        let url = self.endpoint(&["api", "v1", "accident", id]);
        let path = format!("/api/v1/accident/{id}");
        let resp: AccidentDetailResponse = match self.get_json(&url, &path).await {
            Ok(resp) => resp,
            Err(CoreError::NotFound { .. }) => {
                return Err(CoreError::NotFound {
                    resource_type: "Accident".to_string(),
                    id: accident_id.to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        if resp.data.is_none() {
            warn!("사고 상세 응답에 data 없음: {accident_id} ({:?})", resp.message);
        }
        Ok(resp.data)
    }

    async fn monthly_summary(&self) -> Result<Vec<MonthlyCount>, CoreError> {
        self.get_json(&self.route(ACCIDENT_SUMMARY_PATH), ACCIDENT_SUMMARY_PATH)
            .await
    }

    async fn send_dispatch_email(&self, request: &EmailDispatchRequest) -> Result<(), CoreError> {
        debug!(
            "긴급 메일 발송: teams={:?}, severity={:?}",
            request.rescue_teams, request.severity
        );

        let resp = self
            .request(
                reqwest::Method::POST,
                &self.route(SEND_EMAIL_PATH),
                self.request_timeout,
            )
            .await
            .json(request)
            .send()
            .await
            .map_err(|e| Self::send_error("긴급 메일", self.request_timeout, e))?;

        self.check_response(resp, SEND_EMAIL_PATH).await?;
        debug!("긴급 메일 발송 성공");
        Ok(())
    }
}
