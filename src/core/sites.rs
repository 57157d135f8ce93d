use crate::core::Storage;
use crate::domain::model::{SiteConfig, SiteRecord};
use crate::utils::error::{ExportError, Result};
use std::io::Read;

pub const DEFAULT_SITE_TYPE: &str = "GNSS-A";
pub const DEFAULT_TYPE_COLUMN: &str = "site_type";
pub const DEFAULT_ID_COLUMN: &str = "short_name";
pub const DEFAULT_ID_KEY: &str = "uid";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 站點設定產生的欄位與篩選選項
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// `None` keeps every row.
    pub site_type: Option<String>,
    pub type_column: String,
    pub id_column: String,
    pub id_key: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            site_type: Some(DEFAULT_SITE_TYPE.to_string()),
            type_column: DEFAULT_TYPE_COLUMN.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            id_key: DEFAULT_ID_KEY.to_string(),
        }
    }
}

/// CSV 站點清單 -> 每站一份 {site_id}/config.json
pub struct SiteConfigPipeline<S: Storage> {
    storage: S,
    template: serde_json::Map<String, serde_json::Value>,
    options: SiteOptions,
}

impl<S: Storage> SiteConfigPipeline<S> {
    pub fn new(storage: S, template: serde_json::Value, options: SiteOptions) -> Result<Self> {
        let serde_json::Value::Object(template) = template else {
            return Err(ExportError::ConfigValidationError {
                field: "default_config".to_string(),
                message: "Default config must be a JSON object".to_string(),
            });
        };

        Ok(Self {
            storage,
            template,
            options,
        })
    }

    pub fn from_template_str(storage: S, template: &str, options: SiteOptions) -> Result<Self> {
        let template: serde_json::Value = serde_json::from_str(template)?;
        Self::new(storage, template, options)
    }

    pub fn extract<R: Read>(&self, reader: R) -> Result<Vec<SiteRecord>> {
        // 試算表匯出常省略結尾的空白欄位
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let data = headers
                .iter()
                .zip(row.iter())
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .collect();
            records.push(SiteRecord { data });
        }

        tracing::debug!("Read {} site rows", records.len());
        Ok(records)
    }

    pub fn transform(&self, records: Vec<SiteRecord>) -> Result<Vec<SiteConfig>> {
        let mut configs = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if let Some(site_type) = &self.options.site_type {
                let value = self.column(record, &self.options.type_column, index)?;
                if value != site_type.as_str() {
                    continue;
                }
            }

            let site_id = self.column(record, &self.options.id_column, index)?.trim();
            if site_id.is_empty() || site_id.contains(['/', '\\']) {
                return Err(ExportError::InvalidConfigValueError {
                    field: format!("{} (row {})", self.options.id_column, index + 1),
                    value: site_id.to_string(),
                    reason: "Site identifier must be a non-empty directory name".to_string(),
                });
            }

            let mut document = self.template.clone();
            document.insert(
                self.options.id_key.clone(),
                serde_json::Value::String(site_id.to_string()),
            );

            configs.push(SiteConfig {
                site_id: site_id.to_string(),
                document: serde_json::Value::Object(document),
            });
        }

        Ok(configs)
    }

    pub async fn load(&self, configs: &[SiteConfig]) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(configs.len());

        for config in configs {
            let path = format!("{}/{}", config.site_id, CONFIG_FILE_NAME);
            let json = serde_json::to_string_pretty(&config.document)?;
            self.storage.write_file(&path, json.as_bytes()).await?;
            tracing::debug!("Wrote {}", path);
            written.push(path);
        }

        Ok(written)
    }

    pub async fn run<R: Read>(&self, reader: R) -> Result<Vec<String>> {
        let records = self.extract(reader)?;
        let total = records.len();

        let configs = self.transform(records)?;
        tracing::info!("📋 {} of {} sites selected", configs.len(), total);

        self.load(&configs).await
    }

    fn column<'a>(&self, record: &'a SiteRecord, column: &str, index: usize) -> Result<&'a str> {
        record
            .get(column)
            .ok_or_else(|| ExportError::MissingConfigError {
                field: format!("column '{}' in row {}", column, index + 1),
            })
    }
}
