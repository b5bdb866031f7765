//! 配線: 標準アダプタで UseCase を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{
    FileJsonLog, FileKeyValueStore, HumanLog, ReqwestTransport, StdClock, StdEnvResolver,
    StdFileSystem, TeeLog,
};
use common::error::Error;
use common::ports::outbound::{Clock, EnvResolver, FileSystem, HttpTransport, Log, LogLevel, LogRecord};

use crate::adapter::{
    apply_server_override, load_config, AssumeYes, CacheController, CliConfirmation,
    ConsoleConnectivityView, ConsoleNotifier, FileCacheStorage, LocalEntryStore,
    RemoteReflectionClient, RouteHardwareStatus,
};
use crate::cli::Cli;
use crate::domain::{JournalCommand, JournalConfig};
use crate::ports::outbound::{
    CacheStorage, Confirmation, ConnectivityView, HardwareStatus, Notifier, ReachabilityProbe,
};
use crate::usecase::{ConnectivityDeps, ConnectivityMonitor, JournalDeps, JournalUseCase};

pub const SERVER_ENV: &str = "JOURNAL_SERVER";

/// 外界に触れる部品一式（テストではダブルに差し替える）
pub struct Platform {
    pub env: Arc<dyn EnvResolver>,
    pub fs: Arc<dyn FileSystem>,
    pub clock: Arc<dyn Clock>,
    pub network: Arc<dyn HttpTransport>,
    pub notifier: Arc<dyn Notifier>,
    pub view: Arc<dyn ConnectivityView>,
    /// None なら server_url から RouteHardwareStatus を作る
    pub hardware: Option<Arc<dyn HardwareStatus>>,
    /// None なら CLI 入力から決める（--yes なら AssumeYes）
    pub confirmation: Option<Arc<dyn Confirmation>>,
}

impl Platform {
    pub fn std() -> Result<Self, Error> {
        Ok(Self {
            env: Arc::new(StdEnvResolver),
            fs: Arc::new(StdFileSystem),
            clock: Arc::new(StdClock),
            network: Arc::new(ReqwestTransport::new()?),
            notifier: Arc::new(ConsoleNotifier::new()),
            view: Arc::new(ConsoleConnectivityView::new()),
            hardware: None,
            confirmation: None,
        })
    }
}

/// 組み立て済みのアプリ
pub struct App {
    pub config: JournalConfig,
    pub log: Arc<dyn Log>,
    pub journal: JournalUseCase,
    pub cache: Arc<CacheController>,
    pub hardware: Arc<dyn HardwareStatus>,
    probe: Arc<dyn ReachabilityProbe>,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn ConnectivityView>,
    env: Arc<dyn EnvResolver>,
}

impl App {
    /// 接続状態モニタ（status / watch のときだけ作る）
    pub fn connectivity_monitor(&self) -> ConnectivityMonitor {
        ConnectivityMonitor::new(
            ConnectivityDeps {
                probe: Arc::clone(&self.probe),
                view: Arc::clone(&self.view),
                notifier: Arc::clone(&self.notifier),
                log: Arc::clone(&self.log),
            },
            self.config.probe_timeout(),
            self.hardware.is_online(),
        )
    }

    /// export の既定出力先
    pub fn current_dir(&self) -> Result<PathBuf, Error> {
        self.env.current_dir()
    }
}

/// 標準アダプタで配線する
pub fn wire_journal(cli: &Cli) -> Result<App, Error> {
    wire_with(cli, Platform::std()?)
}

pub fn wire_with(cli: &Cli, platform: Platform) -> Result<App, Error> {
    let Platform {
        env,
        fs,
        clock,
        network,
        notifier,
        view,
        hardware,
        confirmation,
    } = platform;

    let dirs = env.resolve_dirs()?;
    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), dirs.log_file()));
    let log: Arc<dyn Log> = if cli.verbose {
        let human: Arc<dyn Log> = Arc::new(HumanLog);
        Arc::new(TeeLog::new(vec![file_log, human]))
    } else {
        file_log
    };

    let config = load_config(fs.as_ref(), &dirs.config_file())?;
    let config = apply_server_override(config, env.var(SERVER_ENV), cli.server.clone())?;
    let _ = log.log(
        &LogRecord::new(LogLevel::Debug, "config loaded")
            .layer("wiring")
            .kind("config")
            .field("server_url", config.server_url.as_str())
            .field("offline_cache", config.offline_cache)
            .field("cache_name", config.cache_name.as_str()),
    );

    let server_url = config.parsed_server_url().map_err(Error::invalid_argument)?;

    let storage: Arc<dyn CacheStorage> =
        Arc::new(FileCacheStorage::new(Arc::clone(&fs), dirs.cache_dir.clone()));
    let cache = Arc::new(CacheController::new(
        storage,
        Arc::clone(&network),
        config.cache_name.clone(),
        server_url.clone(),
        config.static_assets.clone(),
        Arc::clone(&log),
    ));
    let remote_transport: Arc<dyn HttpTransport> = if config.offline_cache {
        cache.clone()
    } else {
        Arc::clone(&network)
    };
    let remote = Arc::new(RemoteReflectionClient::new(
        remote_transport,
        &server_url,
        Arc::clone(&log),
    )?);

    let store = Arc::new(FileKeyValueStore::new(Arc::clone(&fs), dirs.store_dir()));
    let local = Arc::new(LocalEntryStore::new(store, Arc::clone(&clock), Arc::clone(&log)));

    let confirmation = confirmation.unwrap_or_else(|| -> Arc<dyn Confirmation> {
        match cli.command {
            JournalCommand::DeleteRemote { yes: true, .. } => Arc::new(AssumeYes),
            _ => Arc::new(CliConfirmation::new()),
        }
    });
    let hardware = hardware.unwrap_or_else(|| -> Arc<dyn HardwareStatus> {
        Arc::new(RouteHardwareStatus::new(&server_url))
    });

    let journal = JournalUseCase::new(JournalDeps {
        local,
        remote: remote.clone(),
        notifier: Arc::clone(&notifier),
        confirmation,
        fs,
        clock,
        log: Arc::clone(&log),
    });

    Ok(App {
        config,
        log,
        journal,
        cache,
        hardware,
        probe: remote,
        notifier,
        view,
        env,
    })
}
