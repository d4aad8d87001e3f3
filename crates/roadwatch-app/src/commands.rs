//! 명령 처리기.
//!
//! 어댑터를 조립하고 대시보드 컨트롤러를 명령 단위로 구동한다.

use anyhow::{anyhow, bail, Result};
use roadwatch_core::config::AppConfig;
use roadwatch_core::error::CoreError;
use roadwatch_core::models::auth::Credentials;
use roadwatch_core::models::dispatch::DispatchOutcome;
use roadwatch_core::models::video::VideoFile;
use roadwatch_core::ports::api_client::AccidentApi;
use roadwatch_core::ports::authenticator::Authenticator;
use roadwatch_core::ports::notifier::Notifier;
use roadwatch_dashboard::detail::{AccidentDetailView, DetailState};
use roadwatch_dashboard::login::LoginForm;
use roadwatch_dashboard::table::{AccidentTable, Column, SortDirection};
use roadwatch_dashboard::upload::{UploadController, UploadState};
use roadwatch_network::http_client::HttpAccidentApi;
use roadwatch_network::session::SessionContext;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::console::{ConsoleNavigator, ConsoleNotifier, Route};

/// 목록 조회 옵션
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// 1부터 시작하는 페이지 번호
    pub page: usize,
    pub page_size: Option<usize>,
    pub sort: Option<String>,
    pub descending: bool,
}

/// 조립된 애플리케이션
pub struct App {
    config: AppConfig,
    api: Arc<HttpAccidentApi>,
    session: Arc<SessionContext>,
    navigator: Arc<ConsoleNavigator>,
    notifier: Arc<ConsoleNotifier>,
}

impl App {
    /// 설정으로 어댑터 생성 (DI 와이어링)
    pub fn build(config: AppConfig, session_path: PathBuf) -> Result<Self> {
        let session = Arc::new(
            SessionContext::new(&config.server.base_url)
                .with_max_age(config.token_max_age())
                .with_timeout(config.request_timeout())
                .with_store(session_path),
        );
        let api = Arc::new(
            HttpAccidentApi::new(
                &config.server.base_url,
                config.request_timeout(),
                config.upload_timeout(),
            )?
            .with_session(session.clone()),
        );

        Ok(Self {
            config,
            api,
            session,
            navigator: Arc::new(ConsoleNavigator::default()),
            notifier: Arc::new(ConsoleNotifier),
        })
    }

    /// 저장된 세션 복원
    pub async fn restore_session(&self) -> Result<bool> {
        let restored = self.session.restore().await?;
        if restored {
            info!("저장된 세션 복원");
        }
        Ok(restored)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let form = LoginForm::new(
            self.session.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
        );
        match form.submit(&Credentials::new(email, password)).await {
            Ok(()) => {
                if let Some(route) = self.navigator.take() {
                    println!("→ {}", route.path());
                }
                Ok(())
            }
            Err(CoreError::Validation { field, message }) => {
                bail!("{field}: {message}")
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.session.logout().await?;
        println!("로그아웃 완료");
        Ok(())
    }

    /// 영상 업로드 후 분석 결과 표시. `open_details`면 사고 상세까지 이어서 연다.
    pub async fn upload(&self, path: &Path, open_details: bool) -> Result<()> {
        let mut controller = UploadController::new(
            self.api.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
        );

        let file = VideoFile::from_path(path)?;
        if !controller.select_video(file) {
            bail!("영상 파일을 선택할 수 없음: {}", path.display());
        }
        if let Some(preview) = controller.preview_url() {
            debug!("미리보기: {preview}");
        }

        println!("{}", roadwatch_dashboard::upload::PROCESSING_NOTICE);
        controller.submit().await?;

        if let Some(banner) = controller.status_banner() {
            println!("{banner}");
        }
        if controller.state() == &UploadState::Error {
            bail!("영상 처리 실패");
        }
        if let Some(video_url) = controller.video_url() {
            println!("영상: {video_url}");
        }

        if controller.can_view_accident_details() {
            if open_details {
                controller.view_accident_details();
            } else if let Some(id) = controller.result().and_then(|r| r.accident_target()) {
                println!("상세 보기: roadwatch show {id}");
            }
        }

        if let Some(Route::Accident(id)) = self.navigator.take() {
            self.show(&id).await?;
        }
        Ok(())
    }

    /// 사고 목록 테이블 출력
    pub async fn list(&self, options: &ListOptions) -> Result<()> {
        let mut table = AccidentTable::new(&self.config.table);
        table.load(self.api.as_ref()).await;
        if let Some(message) = table.load_error() {
            self.notifier.show_error(message);
        }

        if let Some(size) = options.page_size {
            table.set_page_size(size)?;
        }
        if let Some(name) = options.sort.as_deref() {
            let direction = if options.descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            table.sort_by(Column::parse(name)?, direction);
        }
        table.go_to_page(options.page.saturating_sub(1));

        let headers: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        println!("{}", headers.join(" | "));
        for record in table.page_rows() {
            let cells: Vec<String> = AccidentTable::render_row(record)
                .into_iter()
                .map(|cell| match cell.link {
                    Some(link) => link,
                    None => cell.text,
                })
                .collect();
            println!("{}", cells.join(" | "));
        }
        if table.is_empty() {
            println!("No results.");
        }
        println!(
            "Page {} of {} ({} rows, {} per page)",
            table.page_index() + 1,
            table.page_count(),
            table.len(),
            table.page_size()
        );
        Ok(())
    }

    async fn load_detail(&self, accident_id: &str) -> Result<AccidentDetailView> {
        let mut view =
            AccidentDetailView::new(accident_id, &self.config.detail, &self.config.dispatch);
        view.load(self.api.as_ref()).await;
        if let DetailState::Failed(message) = view.state() {
            self.notifier.show_error(message);
            return Err(anyhow!("{message}"));
        }
        Ok(view)
    }

    /// 사고 상세 출력
    pub async fn show(&self, accident_id: &str) -> Result<()> {
        let view = self.load_detail(accident_id).await?;

        println!("Accident {}", view.accident_id());
        for card in view.info_cards() {
            println!("  {:<24} {}", card.label, card.value);
        }
        if let Some(image) = view.image_url() {
            println!("  {:<24} {}", "Image", image);
        }
        if let Some(map) = view.map_link()? {
            println!("  {:<24} {}", "Map", map);
        }
        let teams: Vec<&str> = view
            .roster()
            .teams()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        println!("  {:<24} {}", "Rescue teams", teams.join(", "));
        Ok(())
    }

    /// 출동팀 긴급 메일 발송
    pub async fn dispatch(&self, accident_id: &str, teams: &[String], all: bool) -> Result<()> {
        let mut view = self.load_detail(accident_id).await?;

        if all {
            if !view.all_checked() {
                view.toggle_all();
            }
        } else {
            for team in teams {
                if !view.check_team(team) {
                    self.notifier
                        .show_warning(&format!("Unknown rescue team: {team}"));
                }
            }
        }

        let outcome = view.quick_mail(self.api.as_ref()).await;
        if outcome.success {
            self.notifier.show_success(&outcome.message);
            Ok(())
        } else if outcome == DispatchOutcome::no_selection() {
            self.notifier.show_warning(&outcome.message);
            Err(anyhow!(outcome.message))
        } else {
            self.notifier.show_error(&outcome.message);
            Err(anyhow!(outcome.message))
        }
    }

    /// 월별 사고 건수 출력
    pub async fn summary(&self) -> Result<()> {
        let counts = self.api.monthly_summary().await?;
        if counts.is_empty() {
            println!("No results.");
        }
        for entry in counts {
            println!("{}  {}", entry.month, entry.count);
        }
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
