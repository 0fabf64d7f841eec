//! Application bootstrap implementation.

use std::sync::Arc;

use tokio::runtime::{Handle, Runtime};
use tokio::sync::watch;
use tracing::info;

use super::error::AppError;
use crate::config::DashboardConfig;
use crate::fetcher::{HttpSnapshotFetcher, SnapshotFetcher};
use crate::scheduler::{IntervalScheduler, RefreshScheduler, TickCallback};
use crate::sync::{Projection, SyncEngine, TickOutcome};
use crate::telemetry::EngineTelemetry;

/// Running dashboard: a sync engine driven by a refresh scheduler.
///
/// Startup order is fetcher, engine, scheduler; the scheduler's first tick
/// starts the initial fetch before `start` returns. Shutdown runs in reverse.
/// Dropping the app shuts it down.
pub struct DashboardApp {
    engine: SyncEngine,
    scheduler: Arc<dyn RefreshScheduler>,
    config: DashboardConfig,

    /// Owned runtime when created via [`start_sync`](Self::start_sync).
    ///
    /// Declared last so it is dropped after the scheduler and engine.
    runtime: Option<Runtime>,
}

impl DashboardApp {
    /// Start on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client
    /// cannot be built, or no runtime is active.
    pub fn start(config: DashboardConfig) -> Result<Self, AppError> {
        let handle = Handle::try_current().map_err(|_| AppError::NoRuntime)?;
        Self::start_on(config, handle)
    }

    /// Start on a dedicated runtime owned by the app.
    ///
    /// For non-async callers such as CLI commands. The runtime lives as long
    /// as the app. Must not be dropped from within an async context.
    pub fn start_sync(config: DashboardConfig) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("pulseboard-sync")
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;

        let mut app = Self::start_on(config, runtime.handle().clone())?;
        app.runtime = Some(runtime);
        Ok(app)
    }

    fn start_on(config: DashboardConfig, runtime: Handle) -> Result<Self, AppError> {
        config.validate()?;

        let fetcher = HttpSnapshotFetcher::new(&config.base_url, config.request_timeout)?;
        info!(
            url = fetcher.url(),
            refresh_interval_secs = config.refresh_interval.as_secs_f64(),
            request_timeout_secs = config.request_timeout.as_secs_f64(),
            "Starting dashboard"
        );

        let scheduler = Arc::new(IntervalScheduler::new(
            config.refresh_interval,
            runtime.clone(),
        ));

        Ok(Self::with_components(
            config,
            Arc::new(fetcher),
            scheduler,
            runtime,
        ))
    }

    /// Assemble from explicit parts and start refreshing.
    ///
    /// The configuration is kept for reporting only; the fetcher and
    /// scheduler are used as given.
    pub fn with_components(
        config: DashboardConfig,
        fetcher: Arc<dyn SnapshotFetcher>,
        scheduler: Arc<dyn RefreshScheduler>,
        runtime: Handle,
    ) -> Self {
        let app = Self {
            engine: SyncEngine::new(fetcher, runtime),
            scheduler,
            config,
            runtime: None,
        };
        app.arm_scheduler();
        app
    }

    fn arm_scheduler(&self) {
        let engine = self.engine.clone();
        let on_tick: TickCallback = Arc::new(move || {
            engine.tick();
        });
        self.scheduler.start(on_tick);
    }

    /// Request an immediate refresh. Dropped if an attempt is in flight.
    pub fn refresh(&self) -> TickOutcome {
        self.engine.refresh()
    }

    pub fn projection(&self) -> Projection {
        self.engine.projection()
    }

    /// Receive a new [`Projection`] after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<Projection> {
        self.engine.subscribe()
    }

    pub fn telemetry(&self) -> EngineTelemetry {
        self.engine.metrics().snapshot()
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Whether the scheduler is currently ticking.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Resume refreshing after [`shutdown`](Self::shutdown).
    ///
    /// Keeps the last snapshot and fetches immediately.
    pub fn restart(&self) {
        if self.scheduler.is_running() {
            return;
        }
        self.engine.resume();
        self.arm_scheduler();
        info!("Dashboard refreshing resumed");
    }

    /// Stop refreshing.
    ///
    /// Idempotent. After this returns no tick fires and no in-flight result
    /// is applied.
    pub fn shutdown(&self) {
        self.scheduler.stop();
        self.engine.stop();
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for DashboardApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardApp")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("running", &self.is_running())
            .field("owns_runtime", &self.runtime.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchError, FetchFuture};
    use crate::scheduler::ManualScheduler;
    use crate::snapshot::MetricsSnapshot;
    use crate::sync::SyncStatus;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl SnapshotFetcher for CountingFetcher {
        fn fetch(&self) -> FetchFuture<'_> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as u64 + 1;
            Box::pin(async move {
                Ok::<_, FetchError>(MetricsSnapshot {
                    active_users_count: n,
                    top_pages: Vec::new(),
                    active_sessions_by_user: Default::default(),
                    timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                })
            })
        }
    }

    fn manual_app() -> (DashboardApp, Arc<ManualScheduler>, Arc<CountingFetcher>) {
        let scheduler = Arc::new(ManualScheduler::new());
        let fetcher = Arc::new(CountingFetcher {
            calls: AtomicUsize::new(0),
        });
        let app = DashboardApp::with_components(
            DashboardConfig::default(),
            fetcher.clone(),
            scheduler.clone(),
            Handle::current(),
        );
        (app, scheduler, fetcher)
    }

    async fn settle(app: &DashboardApp) {
        app.subscribe()
            .wait_for(|p| p.status == SyncStatus::Idle)
            .await
            .unwrap();
    }

    #[test]
    fn test_start_without_runtime_fails() {
        let err = DashboardApp::start(DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::NoRuntime));
    }

    #[test]
    fn test_start_sync_rejects_invalid_config() {
        let config = DashboardConfig::default().with_refresh_interval(Duration::ZERO);
        let err = DashboardApp::start_sync(config).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_start_fetches_immediately() {
        let (app, scheduler, fetcher) = manual_app();

        assert!(app.is_running());
        assert_eq!(scheduler.start_count(), 1);
        assert!(app.projection().is_loading);

        settle(&app).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.projection().active_users_count(), Some(1));
        assert_eq!(app.telemetry().fetches_succeeded, 1);
    }

    #[tokio::test]
    async fn test_scheduler_ticks_drive_engine() {
        let (app, scheduler, fetcher) = manual_app();
        settle(&app).await;

        assert!(scheduler.fire());
        settle(&app).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(app.projection().active_users_count(), Some(2));
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent_and_final() {
        let (app, scheduler, fetcher) = manual_app();
        settle(&app).await;

        app.shutdown();
        app.shutdown();

        assert!(!app.is_running());
        assert_eq!(scheduler.stop_count(), 1);
        assert_eq!(app.refresh(), TickOutcome::Stopped);
        assert!(!scheduler.fire());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_restart_keeps_snapshot_and_refetches() {
        let (app, scheduler, fetcher) = manual_app();
        settle(&app).await;

        app.shutdown();
        app.restart();

        assert_eq!(scheduler.start_count(), 2);
        let projection = app.projection();
        assert!(projection.has_data());
        assert!(!projection.is_loading);

        settle(&app).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }
}
