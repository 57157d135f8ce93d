use crate::core::schedule::{DEFAULT_STEP_MINUTES, DEFAULT_WINDOW_MINUTES};
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{
    validate_positive_number, validate_query_value, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// MxMC 遠端控制的預設位址與埠號
pub const DEFAULT_BASE_URL: &str = "https://localhost:57536";
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 5;

/// Optional TOML settings file. Every field falls back to a built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteSettings {
    pub base_url: Option<String>,
    pub poll_interval_seconds: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub step_minutes: Option<u64>,
    pub window_minutes: Option<u64>,
    pub audio: Option<String>,
}

impl Settings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExportError::MissingFileError {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MXMC_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_url(&self) -> &str {
        self.remote.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn poll_interval_seconds(&self) -> u64 {
        self.remote
            .poll_interval_seconds
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS)
    }

    /// MxMC 只有自簽憑證，預設不驗證
    pub fn accept_invalid_certs(&self) -> bool {
        self.remote.accept_invalid_certs.unwrap_or(true)
    }

    pub fn step_minutes(&self) -> u64 {
        self.schedule.step_minutes.unwrap_or(DEFAULT_STEP_MINUTES)
    }

    pub fn window_minutes(&self) -> u64 {
        self.schedule.window_minutes.unwrap_or(DEFAULT_WINDOW_MINUTES)
    }

    pub fn audio(&self) -> &str {
        self.schedule.audio.as_deref().unwrap_or("off")
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("remote.base_url", self.base_url())?;
        validate_positive_number("schedule.step_minutes", self.step_minutes(), 1)?;
        validate_positive_number("schedule.window_minutes", self.window_minutes(), 1)?;
        validate_query_value("schedule.audio", self.audio())?;
        Ok(())
    }
}
