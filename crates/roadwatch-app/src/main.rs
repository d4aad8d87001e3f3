//! # roadwatch-app
//!
//! ROADWATCH 대시보드 클라이언트 바이너리 진입점.
//! 설정 로드, 세션 복원, DI 와이어링 후 명령을 실행한다.

mod commands;
mod console;
mod lifecycle;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use roadwatch_core::config::AppConfig;
use roadwatch_core::config_manager::ConfigManager;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{App, ListOptions};
use crate::lifecycle::LifecycleManager;

/// ROADWATCH 대시보드 클라이언트
///
/// 교통 영상 사고 탐지 백엔드용 업로드/조회/긴급 메일 도구
#[derive(Parser, Debug)]
#[command(name = "roadwatch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 서버 URL 지정 (기본: 설정 파일 값)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn", global = true)]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 로그인
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// 로그아웃 (저장된 세션 삭제)
    Logout,
    /// 영상 업로드 후 사고 분석
    Upload {
        file: PathBuf,
        /// 사고가 탐지되면 상세 화면까지 연다
        #[arg(long)]
        open: bool,
    },
    /// 사고 목록
    List {
        /// 페이지 번호 (1부터)
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
        /// 정렬 컬럼 (city, latitude, longitude, percent, severity)
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
    },
    /// 사고 상세
    Show { id: String },
    /// 출동팀 긴급 메일 발송
    Dispatch {
        id: String,
        /// 출동팀 이름 (여러 번 지정 가능)
        #[arg(long = "team")]
        teams: Vec<String>,
        /// 모든 출동팀 선택
        #[arg(long)]
        all: bool,
    },
    /// 월별 사고 건수
    Summary,
    /// 현재 설정 출력
    Config,
}

/// 설정 관리자 생성 (CLI 경로 → 플랫폼 기본 경로 → 현재 디렉토리)
fn load_config_manager(path: Option<&Path>) -> Result<ConfigManager> {
    if let Some(path) = path {
        return Ok(ConfigManager::with_path(path.to_path_buf())?);
    }
    match ConfigManager::new() {
        Ok(manager) => Ok(manager),
        Err(e) => {
            warn!("기본 설정 경로 사용 불가: {e}");
            Ok(ConfigManager::with_path(PathBuf::from("./roadwatch-config.json"))?)
        }
    }
}

/// 세션 파일 경로 결정 (설정 값 또는 플랫폼별 데이터 디렉토리)
///
/// - macOS: `~/Library/Application Support/com.roadwatch.dashboard/session.json`
/// - Windows: `%APPDATA%\roadwatch\dashboard\data\session.json`
/// - Linux: `~/.local/share/dashboard/session.json`
fn resolve_session_path(config: &AppConfig) -> PathBuf {
    config
        .session
        .session_file
        .clone()
        .or_else(|| {
            ProjectDirs::from("com", "roadwatch", "dashboard")
                .map(|p| p.data_dir().join("session.json"))
        })
        .unwrap_or_else(|| PathBuf::from("./session.json"))
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => app.login(&email, &password).await,
        Command::Logout => app.logout().await,
        Command::Upload { file, open } => app.upload(&file, open).await,
        Command::List {
            page,
            page_size,
            sort,
            desc,
        } => {
            let options = ListOptions {
                page,
                page_size,
                sort,
                descending: desc,
            };
            app.list(&options).await
        }
        Command::Show { id } => app.show(&id).await,
        Command::Dispatch { id, teams, all } => app.dispatch(&id, &teams, all).await,
        Command::Summary => app.summary().await,
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(app.config())?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "roadwatch={level},roadwatch_core={level},roadwatch_network={level},roadwatch_dashboard={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 설정 로드
    let config_manager = load_config_manager(args.config.as_deref())?;
    info!("설정 파일: {}", config_manager.config_path().display());
    let mut config = config_manager.get();

    // CLI 인자로 설정 오버라이드
    if let Some(ref server_url) = args.server {
        config.server.base_url = server_url.clone();
    }
    info!("서버: {}", config.server.base_url);

    let session_path = resolve_session_path(&config);
    let app = App::build(config, session_path)?;
    if let Err(e) = app.restore_session().await {
        warn!("세션 복원 실패: {e}");
    }

    let lifecycle = LifecycleManager::new();
    lifecycle
        .run_until_shutdown(run(&app, args.command))
        .await
        .ok_or_else(|| anyhow!("작업이 중단됨"))?
}
