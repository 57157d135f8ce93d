pub mod export;
pub mod query;
pub mod schedule;
pub mod sites;

pub use crate::domain::model::{DayBatch, ExportSummary, SiteConfig, SiteRecord, TimeWindow};
pub use crate::domain::ports::{ConfigProvider, RemoteControl, Storage};
pub use crate::utils::error::Result;
