use crate::core::{input, statistics};
use crate::core::{ConfigProvider, InputSource, Pipeline, RawInput, ResultSink};
use crate::domain::model::{StatisticsResult, StoredRecord};
use crate::utils::error::Result;

pub struct StatisticsPipeline<S: ResultSink> {
    source: InputSource,
    sink: S,
}

impl<S: ResultSink> StatisticsPipeline<S> {
    pub fn new(source: InputSource, sink: S) -> Self {
        Self { source, sink }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, sink: S) -> Result<Self> {
        Ok(Self::new(config.input_source()?, sink))
    }
}

#[async_trait::async_trait]
impl<S: ResultSink> Pipeline for StatisticsPipeline<S> {
    async fn extract(&self) -> Result<RawInput> {
        match &self.source {
            InputSource::Inline(_) => tracing::debug!("Using inline input"),
            InputSource::File(path) => tracing::debug!("Reading input from {}", path.display()),
        }
        input::resolve(&self.source)
    }

    async fn transform(&self, raw: RawInput) -> Result<StatisticsResult> {
        statistics::compute(&raw)
    }

    async fn load(&self, statistics: &StatisticsResult) -> Result<StoredRecord> {
        self.sink.store(statistics).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::utils::error::StatsError;

    struct NoInput;

    impl ConfigProvider for NoInput {
        fn input_source(&self) -> Result<InputSource> {
            Err(StatsError::MissingInput)
        }
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let store = MemoryStore::new();
        let pipeline =
            StatisticsPipeline::new(InputSource::Inline("4,1,3".to_string()), store.clone());

        let raw = pipeline.extract().await.unwrap();
        let stats = pipeline.transform(raw).await.unwrap();
        let record = pipeline.load(&stats).await.unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(stats.median, 3.0);
        assert_eq!(store.records().await, vec![record]);
    }

    #[test]
    fn test_from_config_propagates_missing_input() {
        let result = StatisticsPipeline::from_config(&NoInput, MemoryStore::new());
        assert!(matches!(result, Err(StatsError::MissingInput)));
    }
}
