//! 화면 표시용 포맷 헬퍼.

use chrono::{DateTime, FixedOffset, Local};

/// 결측값 표시 문자열
pub const MISSING: &str = "-";

/// 숫자를 불필요한 소수점 없이 표시 (82.0 → "82", 82.5 → "82.5")
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// 서버 날짜를 로컬 시각 문자열로 변환
pub fn format_local(date: &DateTime<FixedOffset>) -> String {
    date.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
