//! # roadwatch-dashboard
//!
//! 대시보드 화면 컨트롤러.
//! 영상 업로드/분석 결과 상태 머신, 사고 목록 테이블(정렬/페이지),
//! 사고 상세와 출동팀 긴급 메일, 로그인 폼을 담당한다.
//! 네트워크는 `roadwatch-core` 포트를 통해서만 접근한다.

pub mod detail;
pub mod display;
pub mod login;
pub mod table;
pub mod upload;

#[cfg(test)]
mod testing;
