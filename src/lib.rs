//! Passstore - a single-user credential manager.
//!
//! Records live in a plain CSV table. A [`ViewCoordinator`] keeps the
//! in-memory collection, per-record secret visibility and the file in step,
//! and computes filtered, masked views for a front end such as the
//! interactive [`Shell`].

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod search;
pub mod shell;
pub mod storage;
pub mod view;
pub mod visibility;

pub use config::AppConfig;
pub use credentials::{CredentialRecord, RecordFields, RecordId, RecordStore};
pub use error::StoreError;
pub use logging::{LogConfig, init_logging};
pub use shell::Shell;
pub use storage::{CsvStorage, PersistenceAdapter};
pub use view::{DisplayRow, ViewCoordinator};
pub use visibility::VisibilityTracker;
