//! 사고 레코드 모델.
//!
//! 목록(`/api/v1/accident/all`), 단건(`/api/v1/accident/{id}`),
//! 월별 요약(`/api/v1/accident/summary`) 응답 구조체.
//! 서버는 누락된 문서 필드를 `null`로 내려주므로 대부분 `Option`이다.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 사고 목록의 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    pub id: String,
    #[serde(default)]
    pub video_name: Option<String>,
    /// 판정 라벨 ("Accident" / "No Accident")
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(rename = "severityInPercentage", default)]
    pub severity_in_percentage: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// 서버 원본 날짜 문자열 (RFC 2822 또는 RFC 3339)
    #[serde(default)]
    pub date: Option<String>,
}

impl AccidentRecord {
    /// 심각도 분류
    pub fn severity_level(&self) -> Severity {
        Severity::parse(self.severity.as_deref().unwrap_or_default())
    }

    /// 날짜 파싱 (실패 시 None)
    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date.as_deref().and_then(parse_backend_date)
    }
}

/// 목록 응답 `{datas: [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccidentListResponse {
    #[serde(default)]
    pub datas: Vec<AccidentRecord>,
}

/// 사고 단건 상세
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(rename = "severityInPercentage", default)]
    pub severity_in_percentage: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl AccidentDetail {
    pub fn severity_level(&self) -> Severity {
        Severity::parse(self.severity.as_deref().unwrap_or_default())
    }

    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date.as_deref().and_then(parse_backend_date)
    }
}

/// 단건 응답 `{data: {...}}` — 에러 응답에는 `data`가 없다
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccidentDetailResponse {
    #[serde(default)]
    pub data: Option<AccidentDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 월별 사고 건수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// "YYYY-MM"
    pub month: String,
    pub count: u64,
}

/// 심각도 분류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
    /// 분류되지 않은 라벨 (원문 유지)
    Other(String),
}

impl Severity {
    /// 서버 라벨을 대소문자 무시하고 분류
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Other(label.trim().to_string()),
        }
    }

    /// 뱃지 색상. High만 빨강, Medium은 주황, 나머지는 초록.
    pub fn badge(&self) -> BadgeColor {
        match self {
            Severity::High => BadgeColor::Red,
            Severity::Medium => BadgeColor::Orange,
            _ => BadgeColor::Green,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
            Severity::Other(label) => write!(f, "{label}"),
        }
    }
}

/// 심각도 뱃지 색상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Red,
    Orange,
    Green,
}

impl BadgeColor {
    /// 스타일 클래스명
    pub fn class_name(self) -> &'static str {
        match self {
            BadgeColor::Red => "bg-red-500",
            BadgeColor::Orange => "bg-orange-500",
            BadgeColor::Green => "bg-green-500",
        }
    }
}

/// 서버 날짜 문자열 파싱 (Flask 기본 RFC 2822, ISO 8601 순으로 시도)
pub fn parse_backend_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_with_nulls() {
        let json = r#"{"status":"success","datas":[
            {"id":"a1","city":"Bengaluru","latitude":12.9698,"longitude":77.75,
             "severity":"High","severityInPercentage":82,"date":"Tue, 14 Jan 2025 10:20:30 GMT"},
            {"id":"a2","city":null,"severity":null,"date":null}
        ]}"#;
        let resp: AccidentListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.datas.len(), 2);
        assert_eq!(resp.datas[0].severity_level(), Severity::High);
        assert!(resp.datas[0].parsed_date().is_some());
        assert!(resp.datas[1].city.is_none());
        assert!(resp.datas[1].parsed_date().is_none());
    }

    #[test]
    fn missing_datas_is_empty() {
        let resp: AccidentListResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.datas.is_empty());
    }

    #[test]
    fn detail_response_without_data() {
        let resp: AccidentDetailResponse =
            serde_json::from_str(r#"{"status":"error","message":"Accident not found"}"#).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.message.as_deref(), Some("Accident not found"));
    }

    #[test]
    fn severity_badges() {
        assert_eq!(Severity::parse("High").badge(), BadgeColor::Red);
        assert_eq!(Severity::parse("medium").badge(), BadgeColor::Orange);
        assert_eq!(Severity::parse("Low").badge(), BadgeColor::Green);
        assert_eq!(Severity::parse("None").badge(), BadgeColor::Green);
        assert_eq!(BadgeColor::Red.class_name(), "bg-red-500");
    }

    #[test]
    fn parses_iso_dates() {
        assert!(parse_backend_date("2025-01-14T10:20:30+00:00").is_some());
        assert!(parse_backend_date("yesterday").is_none());
    }
}
