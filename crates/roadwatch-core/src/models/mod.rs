//! ROADWATCH 도메인 모델.
//!
//! 백엔드 API와 주고받는 데이터 구조체와 클라이언트 측 상태 값을 정의한다.
//! 와이어 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod accident;
pub mod analysis;
pub mod auth;
pub mod dispatch;
pub mod video;
