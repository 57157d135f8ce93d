use crate::config::profile::ExportProfile;
use crate::core::query::{format_timestamp, Query};
use crate::core::schedule::Schedule;
use crate::core::{ConfigProvider, RemoteControl};
use crate::domain::model::{ExportSummary, TimeWindow};
use crate::utils::error::{ExportError, Result};
use chrono::NaiveDate;
use std::time::Duration;

const LIST: &str = "list";
const EXPORTS: &str = "exports";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// 依序驅動 MxMC 匯出：建立設定檔、每天加入時段、匯出、等待、清除
pub struct ExportEngine<R: RemoteControl> {
    remote: R,
    profile: ExportProfile,
    schedule: Schedule,
    export_path: String,
    audio: String,
    poll_interval: Duration,
}

impl<R: RemoteControl> ExportEngine<R> {
    pub fn new(remote: R, profile: ExportProfile, export_path: impl Into<String>) -> Self {
        Self {
            remote,
            profile,
            schedule: Schedule::default(),
            export_path: export_path.into(),
            audio: "off".to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn from_config<C: ConfigProvider>(
        remote: R,
        profile: ExportProfile,
        schedule: Schedule,
        config: &C,
    ) -> Self {
        Self::new(remote, profile, config.export_path())
            .with_schedule(schedule)
            .with_audio(config.audio())
            .with_poll_interval(config.poll_interval())
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = audio.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub async fn list_cameras(&self) -> Result<String> {
        self.remote.send(LIST, &Query::new().arg("cameras", 1)).await
    }

    /// Uploads the export profile; settings from the JSON file follow `create` and `profile`.
    pub async fn setup_profile(&self) -> Result<String> {
        let mut query = Query::new()
            .arg("create", 1)
            .arg("profile", self.profile.name());
        query.extend_json(self.profile.settings());
        self.remote.send(EXPORTS, &query).await
    }

    pub async fn delete_profile(&self) -> Result<String> {
        let query = Query::new()
            .arg("delete", 1)
            .arg("profile", self.profile.name());
        self.remote.send(EXPORTS, &query).await
    }

    /// 不論該時段有沒有影像都加入，MxMC 匯出時才會檢查
    pub async fn add_window(&self, window: &TimeWindow) -> Result<String> {
        let query = Query::new()
            .arg("add", 1)
            .arg("begin", format_timestamp(&window.begin))
            .arg("end", format_timestamp(&window.end))
            .arg("audio", &self.audio);
        self.remote.send(EXPORTS, &query).await
    }

    pub async fn start_export(&self) -> Result<String> {
        let query = Query::new()
            .arg("export", 1)
            .arg("profile", self.profile.name())
            .arg("path", &self.export_path);
        self.remote.send(EXPORTS, &query).await
    }

    pub async fn is_export_active(&self) -> Result<bool> {
        let body = self
            .remote
            .send(EXPORTS, &Query::new().arg("status", 1))
            .await?;
        parse_status(&body)
    }

    /// Blocks until MxMC reports no active export. No timeout.
    pub async fn wait_for_export(&self) -> Result<usize> {
        let mut polls = 0;
        loop {
            polls += 1;
            if !self.is_export_active().await? {
                tracing::debug!("Export finished after {} status checks", polls);
                return Ok(polls);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    pub async fn clear_list(&self) -> Result<String> {
        self.remote.send(EXPORTS, &Query::new().arg("clear", 1)).await
    }

    pub async fn clear_progress(&self) -> Result<String> {
        self.remote
            .send(EXPORTS, &Query::new().arg("clearProgress", 1))
            .await
    }

    pub async fn run(&self, first_day: NaiveDate, last_day: NaiveDate) -> Result<ExportSummary> {
        tracing::info!(
            "🔍 Looking for MxManagementCenter at {}",
            self.remote.base_url()
        );

        let cameras = self.list_cameras().await?;
        println!("Cameras recognised by MxMC:");
        println!("{}", cameras);

        tracing::info!("📋 Creating export profile '{}'", self.profile.name());
        self.setup_profile().await?;

        let mut summary = ExportSummary::default();
        for batch in self.schedule.day_batches(first_day, last_day) {
            tracing::info!("📅 {} ({} windows)", batch.day, batch.windows.len());

            for window in &batch.windows {
                self.add_window(window).await?;
            }

            tracing::info!("🚀 Running export list");
            self.start_export().await?;

            tracing::info!("⏳ Waiting for export to finish...");
            self.wait_for_export().await?;

            self.clear_list().await?;
            self.clear_progress().await?;

            summary.days += 1;
            summary.windows += batch.windows.len();
        }

        tracing::info!(
            "✅ Exports finished: {} days, {} windows",
            summary.days,
            summary.windows
        );
        self.delete_profile().await?;

        Ok(summary)
    }
}

/// `status=1` 的回應是 0 或 1（可能帶換行）
pub fn parse_status(body: &str) -> Result<bool> {
    body.trim()
        .parse::<i64>()
        .map(|n| n != 0)
        .map_err(|_| ExportError::StatusParseError {
            body: body.to_string(),
        })
}
