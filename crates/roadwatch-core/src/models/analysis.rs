//! 영상 분석 결과 모델.
//!
//! 업로드 엔드포인트(`POST /api/v1/public/upload-video`)의 응답을 표현한다.
//! 클라이언트는 이 값을 통째로 저장/교체만 하며 필드를 수정하지 않는다.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// 응답 상태 (`"success"` | `"error"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
    /// 알 수 없는 상태값 (실패로 취급)
    #[serde(other)]
    Unknown,
}

/// 사고 판정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Accident")]
    Accident,
    #[serde(rename = "No Accident")]
    NoAccident,
}

/// 분석 상세 (판정 + 심각도)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// 사고 판정
    pub result: Verdict,
    /// 심각도 라벨 (예: "High")
    #[serde(default)]
    pub severity: Option<String>,
    /// 심각도 백분율
    #[serde(
        rename = "severityInPercentage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub severity_in_percentage: Option<f64>,
}

/// 업로드 응답 전체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: ResponseStatus,
    /// 서버에 저장된 영상 식별자 (재생 URL 생성용)
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub analysis: Option<Analysis>,
    /// 생성된 사고 레코드 ID
    #[serde(
        rename = "accidentId",
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub accident_id: Option<String>,
    /// 에러 응답 메시지 (로그 전용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalysisResult {
    /// `status == "success"` 여부
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// 사고로 판정되었는지
    pub fn is_accident(&self) -> bool {
        self.analysis
            .as_ref()
            .is_some_and(|a| a.result == Verdict::Accident)
    }

    /// 상세 화면으로 이동 가능한 사고 ID.
    ///
    /// 판정이 `Accident`이고 ID가 있을 때만 반환한다.
    pub fn accident_target(&self) -> Option<&str> {
        if self.is_accident() {
            self.accident_id.as_deref()
        } else {
            None
        }
    }
}

/// 문자열/숫자 모두 허용하는 식별자 역직렬화 (빈 문자열은 None)
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("식별자 형식 오류: {other}"))),
    }
}
