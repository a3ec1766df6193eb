pub mod aggregate;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod stats;
pub mod store;

pub use aggregate::derive_status;
pub use audit::{
    AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink, NoopAuditSink,
};
pub use catalog::{InsurerCatalog, InsurerCategory};
pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat};
pub use domain::request::{
    DocumentRef, QuoteRequest, RequestDetails, RequestId, RequestStatus,
};
pub use domain::response::{
    InsurerName, InsurerResponse, QuoteTerms, Resolution, ResponseAction, ResponseStatus,
};
pub use domain::user::{Entity, RequestScope, Role, User};
pub use errors::DomainError;
pub use fixtures::{demo_book, DemoOptions};
pub use stats::{
    broker_summary, comprehensive_performance, insurer_summary, overview, standard_performance,
    BrokerSummary, BusinessLine, CategorySelector, ComprehensiveRow, FixedMetricsProvider,
    InsurerPerformance, InsurerSummary, OperationalMetrics, OperationalMetricsProvider,
    OverviewStats, PerformanceBoard, SampledMetricsProvider, StatsFilter,
};
pub use store::{NewRequest, RequestStore};
