//! 사고 상세 화면.
//!
//! 단건 조회, 정보 카드, 이미지/지도 링크, 출동팀 체크리스트와 긴급 메일 발송.

use roadwatch_core::config::{DetailConfig, DispatchConfig};
use roadwatch_core::error::CoreError;
use roadwatch_core::models::accident::AccidentDetail;
use roadwatch_core::models::dispatch::{DispatchOutcome, EmailDispatchRequest, RescueRoster};
use roadwatch_core::ports::api_client::AccidentApi;
use tracing::{debug, info, warn};
use url::Url;

use crate::display::{format_local, format_number, MISSING};

/// 상세 조회 실패 문구
pub const DETAIL_LOAD_FAILURE: &str = "Failed to load accident data";

/// 상세 화면 로드 상태
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<AccidentDetail>),
    Failed(String),
}

/// 정보 카드 한 칸
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub label: &'static str,
    pub value: String,
}

/// 사고 상세 화면 상태
pub struct AccidentDetailView {
    accident_id: String,
    state: DetailState,
    roster: RescueRoster,
    fallback_image_url: String,
    map_search_url: String,
}

impl AccidentDetailView {
    pub fn new(
        accident_id: impl Into<String>,
        detail_config: &DetailConfig,
        dispatch_config: &DispatchConfig,
    ) -> Self {
        Self {
            accident_id: accident_id.into(),
            state: DetailState::Loading,
            roster: RescueRoster::from_names(dispatch_config.rescue_teams.iter().cloned()),
            fallback_image_url: detail_config.fallback_image_url.clone(),
            map_search_url: detail_config.map_search_url.clone(),
        }
    }

    pub fn accident_id(&self) -> &str {
        &self.accident_id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn detail(&self) -> Option<&AccidentDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail.as_ref()),
            _ => None,
        }
    }

    /// 단건 조회. 데이터가 없거나 요청이 실패하면 `Failed`.
    pub async fn load(&mut self, api: &dyn AccidentApi) {
        self.state = DetailState::Loading;
        self.state = match api.get_accident(&self.accident_id).await {
            Ok(Some(detail)) => {
                debug!("사고 상세 로드: {}", self.accident_id);
                DetailState::Loaded(Box::new(detail))
            }
            Ok(None) => {
                warn!("사고 상세 데이터 없음: {}", self.accident_id);
                DetailState::Failed(DETAIL_LOAD_FAILURE.to_string())
            }
            Err(e) => {
                warn!("사고 상세 조회 실패 ({}): {e}", self.accident_id);
                DetailState::Failed(DETAIL_LOAD_FAILURE.to_string())
            }
        };
    }

    /// 정보 카드 (로드 전이면 빈 목록)
    pub fn info_cards(&self) -> Vec<InfoCard> {
        let Some(detail) = self.detail() else {
            return Vec::new();
        };

        let date = match (detail.parsed_date(), detail.date.as_deref()) {
            (Some(parsed), _) => format_local(&parsed),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => MISSING.to_string(),
        };

        vec![
            InfoCard {
                label: "Address",
                value: detail.address.clone().unwrap_or_else(|| MISSING.to_string()),
            },
            InfoCard {
                label: "Longitude",
                value: detail
                    .longitude
                    .map(format_number)
                    .unwrap_or_else(|| MISSING.to_string()),
            },
            InfoCard {
                label: "Latitude",
                value: detail
                    .latitude
                    .map(format_number)
                    .unwrap_or_else(|| MISSING.to_string()),
            },
            InfoCard {
                label: "Severity",
                value: detail
                    .severity
                    .as_ref()
                    .map(|_| detail.severity_level().to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
            },
            InfoCard {
                label: "Severity In Percentage",
                value: detail
                    .severity_in_percentage
                    .map(|p| format!("{} %", format_number(p)))
                    .unwrap_or_else(|| MISSING.to_string()),
            },
            InfoCard {
                label: "Date",
                value: date,
            },
        ]
    }

    /// 사고 이미지 URL (없으면 대체 이미지)
    pub fn image_url(&self) -> Option<&str> {
        let detail = self.detail()?;
        match detail.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Some(url),
            _ => Some(self.fallback_image_url.as_str()),
        }
    }

    /// 지도 검색 링크 (`?api=1&query=lat,lon`). 좌표가 없으면 None.
    pub fn map_link(&self) -> Result<Option<String>, CoreError> {
        let Some((latitude, longitude)) = self
            .detail()
            .and_then(|d| Some((d.latitude?, d.longitude?)))
        else {
            return Ok(None);
        };
        let mut url = Url::parse(&self.map_search_url)
            .map_err(|e| CoreError::Config(format!("지도 URL 오류: {e}")))?;
        url.set_query(Some(&format!("api=1&query={latitude},{longitude}")));
        Ok(Some(url.to_string()))
    }

    // ── 출동팀 ──

    pub fn roster(&self) -> &RescueRoster {
        &self.roster
    }

    pub fn toggle_team(&mut self, id: &str) -> bool {
        self.roster.toggle(id)
    }

    pub fn check_team(&mut self, name: &str) -> bool {
        self.roster.check_by_name(name)
    }

    pub fn toggle_all(&mut self) {
        self.roster.toggle_all();
    }

    pub fn all_checked(&self) -> bool {
        self.roster.all_checked()
    }

    /// 선택된 출동팀에 긴급 메일 발송
    pub async fn quick_mail(&self, api: &dyn AccidentApi) -> DispatchOutcome {
        let rescue_teams = self.roster.selected_names();
        if rescue_teams.is_empty() {
            debug!("{}", CoreError::EmptySelection);
            return DispatchOutcome::no_selection();
        }

        let Some(detail) = self.detail() else {
            warn!("상세 미로드 상태에서 메일 발송 시도: {}", self.accident_id);
            return DispatchOutcome::failed();
        };

        let request = EmailDispatchRequest {
            latitude: detail.latitude,
            longitude: detail.longitude,
            location: detail.address.clone(),
            severity: detail.severity.clone(),
            rescue_teams,
        };

        match api.send_dispatch_email(&request).await {
            Ok(()) => {
                info!(
                    "긴급 메일 발송 완료: {} → {:?}",
                    self.accident_id, request.rescue_teams
                );
                DispatchOutcome::sent()
            }
            Err(e) => {
                warn!("긴급 메일 발송 실패: {e}");
                DispatchOutcome::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockApi, Reply};

    const DETAIL: &str = r#"{"id":"42","address":"MG Road","city":"Bengaluru",
        "latitude":12.9698,"longitude":77.75,"severity":"High",
        "severityInPercentage":82,"image_url":"","date":"Tue, 14 Jan 2025 10:20:30 GMT"}"#;

    fn view() -> AccidentDetailView {
        AccidentDetailView::new("42", &DetailConfig::default(), &DispatchConfig::default())
    }

    async fn loaded() -> AccidentDetailView {
        let api = MockApi::default().detail(Reply::Json(DETAIL));
        let mut view = view();
        view.load(&api).await;
        view
    }

    #[tokio::test]
    async fn load_populates_cards() {
        let view = loaded().await;
        assert!(matches!(view.state(), DetailState::Loaded(_)));

        let cards = view.info_cards();
        let labels: Vec<_> = cards.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![
                "Address",
                "Longitude",
                "Latitude",
                "Severity",
                "Severity In Percentage",
                "Date"
            ]
        );
        assert_eq!(cards[0].value, "MG Road");
        assert_eq!(cards[2].value, "12.9698");
        assert_eq!(cards[4].value, "82 %");
        assert_ne!(cards[5].value, MISSING);
    }

    #[tokio::test]
    async fn missing_data_fails() {
        let api = MockApi::default().detail(Reply::Json("null"));
        let mut view = view();
        view.load(&api).await;
        assert_eq!(api.detail_calls(), 1);
        assert_eq!(
            view.state(),
            &DetailState::Failed(DETAIL_LOAD_FAILURE.to_string())
        );
        assert!(view.info_cards().is_empty());
        assert!(view.image_url().is_none());

        let mut view = AccidentDetailView::new("x", &DetailConfig::default(), &DispatchConfig::default());
        view.load(&MockApi::default()).await;
        assert!(matches!(view.state(), DetailState::Failed(_)));
    }

    #[tokio::test]
    async fn image_falls_back_and_map_link() {
        let view = loaded().await;
        assert_eq!(
            view.image_url(),
            Some(DetailConfig::default().fallback_image_url.as_str())
        );
        assert_eq!(
            view.map_link().unwrap().as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=12.9698,77.75")
        );
    }

    #[tokio::test]
    async fn missing_coordinates_render_placeholder() {
        let api = MockApi::default().detail(Reply::Json(
            r#"{"id":"7","address":"Ring Road","latitude":null,"severity":"Low"}"#,
        ));
        let mut view = view();
        view.load(&api).await;
        assert!(matches!(view.state(), DetailState::Loaded(_)));

        let cards = view.info_cards();
        assert_eq!(cards[1].value, MISSING);
        assert_eq!(cards[2].value, MISSING);
        assert_eq!(view.map_link().unwrap(), None);

        view.toggle_all();
        let api = api.dispatch(Reply::Json("{}"));
        assert_eq!(view.quick_mail(&api).await, DispatchOutcome::sent());
        assert_eq!(api.dispatched()[0].latitude, None);
    }

    #[tokio::test]
    async fn quick_mail_without_selection_sends_nothing() {
        let view = loaded().await;
        let api = MockApi::default().dispatch(Reply::Json("{}"));

        let outcome = view.quick_mail(&api).await;
        assert_eq!(outcome, DispatchOutcome::no_selection());
        assert!(api.dispatched().is_empty());
    }

    #[tokio::test]
    async fn quick_mail_sends_selected_teams() {
        let mut view = loaded().await;
        assert!(view.toggle_team("1"));
        assert!(view.check_team("fire brigade"));
        let api = MockApi::default().dispatch(Reply::Json("{}"));

        let outcome = view.quick_mail(&api).await;
        assert_eq!(outcome, DispatchOutcome::sent());

        let sent = api.dispatched();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].rescue_teams, vec!["Police", "Fire Brigade"]);
        assert_eq!(sent[0].location.as_deref(), Some("MG Road"));
        assert_eq!(sent[0].severity.as_deref(), Some("High"));
    }

    #[tokio::test]
    async fn quick_mail_failure() {
        let mut view = loaded().await;
        view.toggle_all();
        assert!(view.all_checked());

        let outcome = view.quick_mail(&MockApi::default()).await;
        assert_eq!(outcome, DispatchOutcome::failed());
    }

    #[tokio::test]
    async fn quick_mail_before_load_fails() {
        let mut view = view();
        view.toggle_all();
        let api = MockApi::default().dispatch(Reply::Json("{}"));
        assert_eq!(view.quick_mail(&api).await, DispatchOutcome::failed());
        assert!(api.dispatched().is_empty());
    }

    #[test]
    fn toggle_all_round_trip() {
        let mut view = view();
        assert!(!view.all_checked());
        view.toggle_all();
        assert!(view.all_checked());
        view.toggle_team("2");
        assert!(!view.all_checked());
        view.toggle_all();
        assert!(view.all_checked());
        view.toggle_all();
        assert!(view.roster().selected_names().is_empty());
    }
}
