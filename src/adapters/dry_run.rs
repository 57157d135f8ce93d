use crate::core::query::{command_url, Query};
use crate::core::RemoteControl;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// 只印出 URL，不連線到 MxMC
pub struct DryRunRemote {
    base_url: String,
    urls: Mutex<Vec<String>>,
}

impl DryRunRemote {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RemoteControl for DryRunRemote {
    async fn send(&self, command: &str, query: &Query) -> Result<String> {
        let url = command_url(&self.base_url, command, query);
        println!("{}", url);
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(url);
        }

        // 回報沒有進行中的匯出，等待迴圈就不會卡住
        if query.get("status").is_some() {
            return Ok("0".to_string());
        }
        Ok(String::new())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
