//! Live request-count dashboard pipeline: append-only event log, pure
//! filter/paginate/group stages, chart series assembly, and CSV export.

pub mod app;
pub mod criteria;
pub mod event;
pub mod export;
pub mod filter;
pub mod group;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod producer;
pub mod series;
pub mod store;

pub use criteria::{
    CriteriaService, CriteriaTelemetry, CriteriaUpdate, FilterCriteria, InvalidCriteriaError,
};
pub use event::{format_instant, parse_instant, Event, EventRecord, InvalidEventError};
pub use export::{to_csv, CsvDocument, EXPORT_FILE_NAME};
pub use filter::filter;
pub use group::{group, ColorScheme, EndpointGroups};
pub use logging::{JsonLineLogger, LogChunk, LogLevel, LogRotationPolicy, LoggingError};
pub use page::{page_count, paginate, PageOverflowPolicy, PageWindow};
pub use pipeline::{ChartView, DashboardSession, RunPhase, SessionConfig, SessionTelemetry};
pub use producer::{
    EventProducer, EventSink, ProducerDriver, SyntheticProducer, SyntheticProducerConfig,
    SystemWallClock, WallClock,
};
pub use series::{build, ChartData, ChartSeries, PointOrder, SeriesPoint};
pub use store::{reference_records, EventStore, StoreMetrics};
