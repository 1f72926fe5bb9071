use crate::domain::model::{InputSource, RawInput, StatisticsResult, StoredRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn input_source(&self) -> Result<InputSource>;
}

/// Persists one statistics row and hands back its generated identifier.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn store(&self, statistics: &StatisticsResult) -> Result<StoredRecord>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawInput>;
    async fn transform(&self, raw: RawInput) -> Result<StatisticsResult>;
    async fn load(&self, statistics: &StatisticsResult) -> Result<StoredRecord>;
}
