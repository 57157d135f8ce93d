//! Raw query strings for the MxMC remote-control interface.
//!
//! MxMC expects timestamps as `YYYY-MM-DD+HH:MM:SS`. A form encoder would turn
//! the `+` into `%2B`, so arguments are concatenated as-is.

use chrono::NaiveDateTime;
use std::fmt::Display;

/// MxMC 要求的時間格式
pub const MXMC_DATETIME_FORMAT: &str = "%Y-%m-%d+%H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value`.
    pub fn arg(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Replaces the value of `key` in place, or appends it when absent.
    pub fn set(&mut self, key: &str, value: impl Display) {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// 把 JSON 設定合併進來：字串不加引號，其他型別用 JSON 文字
    pub fn extend_json(&mut self, settings: &serde_json::Map<String, serde_json::Value>) {
        for (key, value) in settings {
            self.set(key, json_query_value(value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// The text a JSON setting takes in the query string.
pub fn json_query_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(MXMC_DATETIME_FORMAT).to_string()
}

pub fn command_url(base_url: &str, command: &str, query: &Query) -> String {
    format!(
        "{}/{}?{}",
        base_url.trim_end_matches('/'),
        command,
        query.to_query_string()
    )
}
