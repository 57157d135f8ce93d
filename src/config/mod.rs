#[cfg(feature = "cli")]
pub mod cli;
pub mod profile;
pub mod settings;

use crate::config::profile::ExportProfile;
use crate::config::settings::{Settings, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_SECONDS};
use crate::core::schedule::{Schedule, DEFAULT_STEP_MINUTES, DEFAULT_WINDOW_MINUTES};
use crate::core::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{
    validate_date_order, validate_non_empty_string, validate_path, validate_positive_number,
    validate_query_value, validate_url, Validate,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PROFILE: &str = "greenland";

/// 合併預設值、TOML 設定與命令列參數後的匯出設定
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub date_start: NaiveDate,
    pub date_finish: NaiveDate,
    pub export_path: String,
    pub profile: String,
    pub profile_dir: PathBuf,
    pub base_url: String,
    pub poll_interval_seconds: u64,
    pub accept_invalid_certs: bool,
    pub step_minutes: u64,
    pub window_minutes: u64,
    pub audio: String,
    pub dry_run: bool,
}

impl ExportConfig {
    pub fn new(date_start: NaiveDate, date_finish: NaiveDate, export_path: String) -> Self {
        Self {
            date_start,
            date_finish,
            export_path,
            profile: DEFAULT_PROFILE.to_string(),
            profile_dir: PathBuf::from("."),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECONDS,
            accept_invalid_certs: true,
            step_minutes: DEFAULT_STEP_MINUTES,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            audio: "off".to_string(),
            dry_run: false,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.base_url = settings.base_url().to_string();
        self.poll_interval_seconds = settings.poll_interval_seconds();
        self.accept_invalid_certs = settings.accept_invalid_certs();
        self.step_minutes = settings.step_minutes();
        self.window_minutes = settings.window_minutes();
        self.audio = settings.audio().to_string();
    }

    pub fn schedule(&self) -> Result<Schedule> {
        Schedule::from_minutes(self.step_minutes, self.window_minutes)
    }

    pub fn profile_path(&self) -> PathBuf {
        ExportProfile::path_in(&self.profile_dir, &self.profile)
    }

    pub fn load_profile(&self) -> Result<ExportProfile> {
        ExportProfile::load(&self.profile_dir, &self.profile)
    }

    /// 送出任何指令前先確認匯出目錄與設定檔存在
    pub fn check_paths(&self) -> Result<()> {
        if !Path::new(&self.export_path).is_dir() {
            return Err(ExportError::MissingFileError {
                path: self.export_path.clone(),
            });
        }

        let profile_path = self.profile_path();
        if !profile_path.is_file() {
            return Err(ExportError::MissingFileError {
                path: profile_path.display().to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for ExportConfig {
    fn export_path(&self) -> &str {
        &self.export_path
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    fn audio(&self) -> &str {
        &self.audio
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_path("export_to", &self.export_path)?;
        validate_query_value("export_to", &self.export_path)?;
        validate_non_empty_string("profile", &self.profile)?;
        validate_query_value("profile", &self.profile)?;
        validate_query_value("audio", &self.audio)?;
        validate_date_order("date_finish", self.date_start, self.date_finish)?;
        validate_positive_number("step_minutes", self.step_minutes, 1)?;
        validate_positive_number("window_minutes", self.window_minutes, 1)?;
        self.schedule()?;
        Ok(())
    }
}
