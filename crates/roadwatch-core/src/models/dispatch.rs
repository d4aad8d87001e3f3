//! 출동팀 긴급 메일 모델.

use serde::{Deserialize, Serialize};

/// 출동팀 (체크박스 한 항목)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescueTeam {
    pub id: String,
    pub name: String,
    pub is_checked: bool,
}

/// 출동팀 체크리스트
///
/// "전체" 체크 상태는 저장하지 않고 항상 팀 목록에서 계산한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescueRoster {
    teams: Vec<RescueTeam>,
}

impl RescueRoster {
    /// 팀 이름 목록으로 생성 (모두 미선택, ID는 1부터 순번)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| RescueTeam {
                id: (i + 1).to_string(),
                name: name.into(),
                is_checked: false,
            })
            .collect();
        Self { teams }
    }

    pub fn teams(&self) -> &[RescueTeam] {
        &self.teams
    }

    /// 단일 팀 토글. 해당 ID가 없으면 false.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.teams.iter_mut().find(|t| t.id == id) {
            Some(team) => {
                team.is_checked = !team.is_checked;
                true
            }
            None => false,
        }
    }

    /// 이름으로 팀 선택 (대소문자 무시). 해당 이름이 없으면 false.
    pub fn check_by_name(&mut self, name: &str) -> bool {
        match self
            .teams
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
        {
            Some(team) => {
                team.is_checked = true;
                true
            }
            None => false,
        }
    }

    /// "전체" 토글 — 현재 전체 선택이면 모두 해제, 아니면 모두 선택
    pub fn toggle_all(&mut self) {
        let target = !self.all_checked();
        for team in &mut self.teams {
            team.is_checked = target;
        }
    }

    /// 모든 팀이 선택되었는지 (빈 목록은 false)
    pub fn all_checked(&self) -> bool {
        !self.teams.is_empty() && self.teams.iter().all(|t| t.is_checked)
    }

    /// 선택된 팀 이름 (목록 순서 유지)
    pub fn selected_names(&self) -> Vec<String> {
        self.teams
            .iter()
            .filter(|t| t.is_checked)
            .map(|t| t.name.clone())
            .collect()
    }
}

/// 긴급 메일 발송 요청 (`POST /api/v1/emails/send-email`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDispatchRequest {
    /// 좌표가 없으면 null로 보낸다
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// 주소. 없으면 서버가 "Unknown location"으로 채운다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(rename = "rescueTeams")]
    pub rescue_teams: Vec<String>,
}

/// 발송 결과 (화면 토스트용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub success: bool,
    pub message: String,
}

impl DispatchOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Mail sent successfully".to_string(),
        }
    }

    pub fn no_selection() -> Self {
        Self {
            success: false,
            message: "No rescue teams selected".to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: "Mail sending failed".to_string(),
        }
    }
}
