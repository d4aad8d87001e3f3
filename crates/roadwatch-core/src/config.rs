//! 애플리케이션 설정 구조체.
//!
//! 백엔드 URL, 요청/업로드 타임아웃, 목록 페이지 크기, 세션 토큰 보관,
//! 출동팀 목록 등 런타임 설정을 정의한다. `ConfigManager`가 JSON 파일로 로드/저장한다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 백엔드 연결 설정
    pub server: ServerConfig,
    /// 사고 목록 테이블 설정
    #[serde(default)]
    pub table: TableConfig,
    /// 로그인 세션 설정
    #[serde(default)]
    pub session: SessionConfig,
    /// 출동팀 메일 설정
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// 사고 상세 화면 설정
    #[serde(default)]
    pub detail: DetailConfig,
}

/// 백엔드 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API 서버 기본 URL (예: "http://127.0.0.1:8080")
    pub base_url: String,
    /// 일반 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 영상 업로드 타임아웃 (밀리초). 서버에서 분석까지 끝나야 응답이 온다.
    #[serde(default = "default_upload_timeout_ms")]
    pub upload_timeout_ms: u64,
}

// ============================================================
// 테이블 설정
// ============================================================

/// 사고 목록 테이블 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// 기본 페이지 크기
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// 선택 가능한 페이지 크기
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

// ============================================================
// 세션 설정
// ============================================================

/// 로그인 세션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 토큰 보관 기간 (초)
    #[serde(default = "default_token_max_age_secs")]
    pub token_max_age_secs: i64,
    /// 세션 파일 경로 (None이면 데이터 디렉토리의 session.json)
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_max_age_secs: default_token_max_age_secs(),
            session_file: None,
        }
    }
}

// ============================================================
// 출동팀 설정
// ============================================================

/// 출동팀 메일 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// 체크리스트에 표시할 출동팀 이름
    #[serde(default = "default_rescue_teams")]
    pub rescue_teams: Vec<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            rescue_teams: default_rescue_teams(),
        }
    }
}

// ============================================================
// 상세 화면 설정
// ============================================================

/// 사고 상세 화면 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailConfig {
    /// 사고 이미지가 없을 때 표시할 이미지 URL
    #[serde(default = "default_fallback_image_url")]
    pub fallback_image_url: String,
    /// 지도 검색 링크 기본 URL
    #[serde(default = "default_map_search_url")]
    pub map_search_url: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            fallback_image_url: default_fallback_image_url(),
            map_search_url: default_map_search_url(),
        }
    }
}

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://127.0.0.1:8080".to_string(),
                request_timeout_ms: default_request_timeout_ms(),
                upload_timeout_ms: default_upload_timeout_ms(),
            },
            table: TableConfig::default(),
            session: SessionConfig::default(),
            dispatch: DispatchConfig::default(),
            detail: DetailConfig::default(),
        }
    }

    /// 일반 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// 업로드 타임아웃을 Duration으로 반환
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.server.upload_timeout_ms)
    }

    /// 토큰 보관 기간을 chrono Duration으로 반환
    pub fn token_max_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session.token_max_age_secs)
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_upload_timeout_ms() -> u64 {
    300_000
}

fn default_page_size() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 20, 30, 40, 50]
}

fn default_token_max_age_secs() -> i64 {
    60 * 60 * 24
}

fn default_rescue_teams() -> Vec<String> {
    ["Police", "Ambulance", "Fire Brigade", "Hospital"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_fallback_image_url() -> String {
    "https://via.placeholder.com/1000x600?text=Accident+Image+Unavailable".to_string()
}

fn default_map_search_url() -> String {
    "https://www.google.com/maps/search/".to_string()
}
