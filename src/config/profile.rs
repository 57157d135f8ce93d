use crate::core::query::json_query_value;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_query_value, Validate};
use std::path::{Path, PathBuf};

/// 匯出設定檔名稱：mxmc_profile_{profile}.json
pub const PROFILE_FILE_TEMPLATE: &str = "mxmc_profile_{}.json";

/// Named export-quality settings uploaded to MxMC before exporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportProfile {
    name: String,
    settings: serde_json::Map<String, serde_json::Value>,
}

impl ExportProfile {
    pub fn file_name(name: &str) -> String {
        PROFILE_FILE_TEMPLATE.replace("{}", name)
    }

    pub fn path_in<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
        dir.as_ref().join(Self::file_name(name))
    }

    /// 從目錄載入 mxmc_profile_{name}.json
    pub fn load<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self> {
        let path = Self::path_in(dir, name);
        if !path.is_file() {
            return Err(ExportError::MissingFileError {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading export profile from {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(name, &content)
    }

    pub fn from_json_str(name: &str, content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let serde_json::Value::Object(settings) = value else {
            return Err(ExportError::ConfigValidationError {
                field: Self::file_name(name),
                message: "Export profile must be a JSON object".to_string(),
            });
        };

        let profile = Self {
            name: name.to_string(),
            settings,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.settings
    }

    pub fn quality(&self) -> Option<&str> {
        self.settings.get("quality").and_then(|v| v.as_str())
    }
}

impl Validate for ExportProfile {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("profile", &self.name)?;
        validate_query_value("profile", &self.name)?;
        for (key, value) in &self.settings {
            validate_query_value(key, key)?;
            validate_query_value(key, &json_query_value(value))?;
        }
        Ok(())
    }
}
