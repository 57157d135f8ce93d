use crate::core::query::Query;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn export_path(&self) -> &str;
    fn poll_interval(&self) -> Duration;
    fn audio(&self) -> &str;
}

/// MxMC 遠端控制的傳輸層，回傳解碼後的 response body
#[async_trait]
pub trait RemoteControl: Send + Sync {
    async fn send(&self, command: &str, query: &Query) -> Result<String>;

    fn base_url(&self) -> &str;
}
