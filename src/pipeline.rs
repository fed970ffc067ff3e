use crate::criteria::{CriteriaService, CriteriaUpdate, FilterCriteria, InvalidCriteriaError};
use crate::export::CsvDocument;
use crate::filter::filter;
use crate::group::{group, ColorScheme};
use crate::logging::{JsonLineLogger, LogLevel, LogRotationPolicy};
use crate::page::{page_count, paginate, PageOverflowPolicy, PageWindow};
use crate::series::{build, ChartData, PointOrder};
use crate::store::EventStore;
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;

/// Session tunables fixed at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub page_size: usize,
    pub colors: ColorScheme,
    pub point_order: PointOrder,
    pub overflow_policy: PageOverflowPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            colors: ColorScheme::default(),
            point_order: PointOrder::default(),
            overflow_policy: PageOverflowPolicy::default(),
        }
    }
}

/// Loading phase owned by the session. The pure stages never read or write
/// this; callers poll it around `refresh` if they surface a spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Filtering,
}

/// Outcome of one pipeline run over a store snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub chart: ChartData,
    pub window: PageWindow,
    pub log_total: usize,
    pub filtered_total: usize,
    pub page_len: usize,
    pub page_count: u64,
}

/// Caller-side orchestrator owning view state over a shared event store.
///
/// Every refresh re-runs the full pipeline against a fresh snapshot; nothing
/// is patched incrementally, so appends landing mid-run surface on the next
/// run. Criteria changes never reset the page; `ChartView` carries the totals
/// a caller needs to decide about pagination itself.
pub struct DashboardSession {
    store: EventStore,
    criteria: CriteriaService,
    window: PageWindow,
    colors: ColorScheme,
    point_order: PointOrder,
    overflow_policy: PageOverflowPolicy,
    phase: RunPhase,
    telemetry: SessionTelemetry,
    logger: JsonLineLogger,
}

impl DashboardSession {
    /// Creates a session over the given store handle.
    pub fn new(store: EventStore, config: SessionConfig) -> Self {
        Self {
            store,
            criteria: CriteriaService::new(),
            window: PageWindow::first(config.page_size),
            colors: config.colors,
            point_order: config.point_order,
            overflow_policy: config.overflow_policy,
            phase: RunPhase::Idle,
            telemetry: SessionTelemetry::default(),
            logger: JsonLineLogger::new(LogRotationPolicy::default()),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Criteria currently in force.
    pub fn criteria(&self) -> &FilterCriteria {
        self.criteria.current()
    }

    pub fn criteria_version(&self) -> u64 {
        self.criteria.version()
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Run counters for this session.
    pub fn telemetry(&self) -> &SessionTelemetry {
        &self.telemetry
    }

    /// Applies one criteria update. A rejected update retains the previous
    /// criteria; the page window is never reset here.
    pub fn update_criteria(
        &mut self,
        update: CriteriaUpdate,
    ) -> Result<u64, InvalidCriteriaError> {
        match self.criteria.apply(update) {
            Ok(version) => {
                self.log(
                    LogLevel::Info,
                    &format!("criteria version {version} in force"),
                );
                Ok(version)
            }
            Err(err) => {
                self.log(LogLevel::Warn, &format!("criteria update rejected: {err}"));
                Err(err)
            }
        }
    }

    /// Recolors future groupings; series already handed out keep their color.
    pub fn set_default_color(&mut self, color: impl Into<String>) {
        self.colors.default = color.into();
    }

    pub fn set_flagged_color(&mut self, color: impl Into<String>) {
        self.colors.flagged = color.into();
    }

    pub fn next_page(&mut self) {
        self.window = self.window.next();
    }

    pub fn prev_page(&mut self) {
        self.window = self.window.prev();
    }

    pub fn go_to_page(&mut self, page_number: u64) {
        self.window = self.window.at(page_number);
    }

    /// Runs snapshot → filter → paginate → group → build and returns the
    /// finished view.
    ///
    /// The session sits in `RunPhase::Filtering` for the duration of the
    /// call. Under `PageOverflowPolicy::ClampToLastPage` the session adopts
    /// the snapped window.
    pub fn refresh(&mut self) -> ChartView {
        self.phase = RunPhase::Filtering;
        let started = Instant::now();
        let events = self.store.snapshot();
        let filtered = filter(&events, self.criteria.current());
        let window = self.overflow_policy.apply(self.window, filtered.len());
        self.window = window;
        let page = paginate(&filtered, &window);
        let page_len = page.len();
        let chart = build(group(page, &self.colors), self.point_order);
        let view = ChartView {
            chart,
            window,
            log_total: events.len(),
            filtered_total: filtered.len(),
            page_len,
            page_count: page_count(filtered.len(), window.page_size()),
        };
        self.telemetry.runs_total += 1;
        self.telemetry.last_run_ms = millis(started.elapsed());
        self.telemetry.last_filtered_total = view.filtered_total;
        self.telemetry.last_page_len = view.page_len;
        self.phase = RunPhase::Idle;
        self.log(
            LogLevel::Debug,
            &format!(
                "kept {} of {} events, page {} holds {}",
                view.filtered_total,
                view.log_total,
                window.page_number(),
                view.page_len
            ),
        );
        view
    }

    /// Renders the export document for the current criteria over a fresh
    /// snapshot. Pagination plays no part here.
    pub fn export_csv(&mut self) -> CsvDocument {
        let events = self.store.snapshot();
        let filtered = filter(&events, self.criteria.current());
        let document = CsvDocument::render(&filtered);
        self.telemetry.exports_total += 1;
        self.telemetry.last_export_rows = filtered.len();
        self.log(
            LogLevel::Info,
            &format!(
                "exported {} rows to {}",
                filtered.len(),
                document.file_name
            ),
        );
        document
    }

    /// Applies a dynamic log-level override.
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.logger.set_level(level);
    }

    /// Log lines accumulated so far, oldest first.
    pub fn log_lines(&self) -> Vec<String> {
        self.logger.lines()
    }

    /// Renders session, criteria, and store counters as a text exposition.
    pub fn render_telemetry(&self) -> String {
        format!(
            "pulseboard_runs_total {}\npulseboard_exports_total {}\npulseboard_last_export_rows {}\npulseboard_last_run_ms {}\npulseboard_last_filtered_total {}\npulseboard_criteria_version {}\npulseboard_criteria_rejected_total {}\npulseboard_events_accepted_total {}\npulseboard_events_rejected_total {}\n",
            self.telemetry.runs_total,
            self.telemetry.exports_total,
            self.telemetry.last_export_rows,
            self.telemetry.last_run_ms,
            self.telemetry.last_filtered_total,
            self.criteria.version(),
            self.criteria.telemetry().rejected_updates_total,
            self.store.metrics().accepted_total(),
            self.store.metrics().rejected_total()
        )
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        let ts_ms = Utc::now().timestamp_millis().max(0) as u64;
        let run = self.telemetry.runs_total;
        let _ = self.logger.log(ts_ms, level, "pipeline", run, message);
    }
}

/// Run counters exposed by the session.
#[derive(Debug, Clone, Default)]
pub struct SessionTelemetry {
    pub runs_total: u64,
    pub exports_total: u64,
    pub last_export_rows: usize,
    pub last_run_ms: u64,
    pub last_filtered_total: usize,
    pub last_page_len: usize,
}

fn millis(duration: std::time::Duration) -> u64 {
    duration.as_millis().min(u128::from(u64::MAX)) as u64
}
