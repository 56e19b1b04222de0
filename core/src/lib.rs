pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use api::{Classifier, FileRemoteGateway, KeywordClassifier, RemoteGateway, RemoteTask};
pub use config::{Config, Overrides};
pub use error::{ConfigError, NetworkError, SyncError};
pub use model::annotation::Annotation;
pub use model::task::{Level, Status, Task};
pub use repository::{FileTaskStore, LocalStore};
pub use service::dto::TaskDto;
pub use service::ranking::{rank, rank_scored};
pub use service::reconcile::{reconcile, Reconciliation};
pub use service::scoring::{is_urgent, score, urgency_bucket, Weights};
pub use service::sync_service::{SyncListener, SyncReport, SyncService};
pub use time::parse_due;
