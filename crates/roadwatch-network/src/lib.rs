//! # roadwatch-network
//!
//! 사고 탐지 백엔드 HTTP 어댑터.
//! 영상 업로드(multipart), 사고 목록/상세/월별 요약 조회, 긴급 메일 발송,
//! 로그인 세션(토큰 보관 및 파일 영속화)을 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use roadwatch_network::http_client::HttpAccidentApi;
//! use roadwatch_network::session::SessionContext;
//!
//! let session = Arc::new(SessionContext::new(base_url).with_store(path));
//! let api = HttpAccidentApi::new(base_url, timeout, upload_timeout)?.with_session(session);
//! ```

pub mod http_client;
pub mod session;
