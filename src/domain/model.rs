use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 一段要加入 MxMC 匯出清單的時間區間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// 一天為一批匯出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBatch {
    pub day: NaiveDate,
    pub windows: Vec<TimeWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub days: usize,
    pub windows: usize,
}

/// CSV 的一列，以欄位名稱為 key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteRecord {
    pub data: HashMap<String, String>,
}

impl SiteRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.data.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub site_id: String,
    pub document: serde_json::Value,
}
