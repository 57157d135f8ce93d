use crate::config::settings::Settings;
use crate::config::{ExportConfig, DEFAULT_PROFILE};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "mxmc-export")]
#[command(
    about = "Control exports from Mobotix cameras through Mobotix ManagementCenter, one export batch per day"
)]
pub struct CliConfig {
    /// Start date, yyyy-mm-dd
    pub date_start: NaiveDate,

    /// End date (inclusive), yyyy-mm-dd
    pub date_finish: NaiveDate,

    /// Directory to export the clips to
    pub export_to: String,

    /// Export profile name; loads mxmc_profile_{profile}.json
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Directory containing the profile JSON file
    #[arg(long, default_value = ".")]
    pub profile_dir: PathBuf,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the MxMC remote-control URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Seconds between export status checks
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Minutes between the start of consecutive windows
    #[arg(long)]
    pub step_minutes: Option<u64>,

    /// Length of each exported window in minutes
    #[arg(long)]
    pub window_minutes: Option<u64>,

    /// Print the remote-control URLs instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// 預設值 -> TOML 設定 -> 命令列參數
    pub fn resolve(&self) -> Result<ExportConfig> {
        let mut config = ExportConfig::new(
            self.date_start,
            self.date_finish,
            self.export_to.clone(),
        );
        config.profile = self.profile.clone();
        config.profile_dir = self.profile_dir.clone();
        config.dry_run = self.dry_run;

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading settings from: {}", path.display());
            let settings = Settings::from_file(path)?;
            settings.validate()?;
            config.apply_settings(&settings);
        }

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(poll_interval) = self.poll_interval {
            config.poll_interval_seconds = poll_interval;
        }
        if let Some(step) = self.step_minutes {
            config.step_minutes = step;
        }
        if let Some(window) = self.window_minutes {
            config.window_minutes = window;
        }

        config.validate()?;
        Ok(config)
    }
}
