//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! `roadwatch-network`가 백엔드 포트를 구현하고, 화면 계층(내비게이션/알림)은
//! `roadwatch-app`이 구현하며, `Arc<dyn T>`로 와이어링한다.
//!
//! 비동기 trait은 `async_trait` 매크로를 사용하여 object safety를 보장한다.

pub mod api_client;
pub mod authenticator;
pub mod navigator;
pub mod notifier;
