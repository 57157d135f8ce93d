pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{dry_run::DryRunRemote, http::MxmcClient, storage::LocalStorage};
pub use config::{profile::ExportProfile, settings::Settings, ExportConfig};
pub use core::{
    export::ExportEngine,
    schedule::Schedule,
    sites::{SiteConfigPipeline, SiteOptions},
};
pub use utils::error::{ExportError, Result};
