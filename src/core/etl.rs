use crate::core::Pipeline;
use crate::domain::model::{StatisticsResult, StoredRecord};
use crate::utils::error::{Result, StatsError};

/// Identifier reported when the row could not be stored.
pub const UNSTORED_ID: i64 = -1;

#[derive(Debug)]
pub enum StorageOutcome {
    Stored(StoredRecord),
    Failed(StatsError),
}

impl StorageOutcome {
    pub fn record_id(&self) -> i64 {
        match self {
            StorageOutcome::Stored(record) => record.id,
            StorageOutcome::Failed(_) => UNSTORED_ID,
        }
    }

    pub fn error(&self) -> Option<&StatsError> {
        match self {
            StorageOutcome::Stored(_) => None,
            StorageOutcome::Failed(err) => Some(err),
        }
    }
}

/// Statistics were computed; storing them may still have failed.
#[derive(Debug)]
pub struct RunOutcome {
    pub statistics: StatisticsResult,
    pub storage: StorageOutcome,
}

impl RunOutcome {
    pub fn record_id(&self) -> i64 {
        self.storage.record_id()
    }

    /// Lines printed to stdout for this run.
    pub fn report(&self) -> String {
        format!(
            "{}\nStatistics stored in the database with ID: {}",
            self.statistics,
            self.record_id()
        )
    }
}

pub struct StatisticsEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> StatisticsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Input and parse failures abort the run. A failed insert does not:
    /// it is returned inside the outcome next to the computed values.
    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting statistics run");

        // Extract
        let raw = self.pipeline.extract().await?;

        // Transform
        let statistics = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Computed mean={} median={}",
            statistics.mean,
            statistics.median
        );

        // Load
        let storage = match self.pipeline.load(&statistics).await {
            Ok(record) => {
                tracing::info!("✅ Stored statistics with ID {}", record.id);
                StorageOutcome::Stored(record)
            }
            Err(e) => {
                tracing::error!("❌ Failed to store statistics: {}", e);
                StorageOutcome::Failed(e)
            }
        };

        Ok(RunOutcome {
            statistics,
            storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::core::pipeline::StatisticsPipeline;
    use crate::core::{InputSource, ResultSink};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FailingSink {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ResultSink for FailingSink {
        async fn store(&self, _statistics: &StatisticsResult) -> Result<StoredRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StatsError::persistence("connection refused"))
        }
    }

    fn inline(text: &str) -> InputSource {
        InputSource::Inline(text.to_string())
    }

    #[tokio::test]
    async fn test_successful_run_reports_generated_id() {
        let store = MemoryStore::new();
        let engine = StatisticsEngine::new(StatisticsPipeline::new(inline("1,2,3,4"), store));

        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome.record_id(), 1);
        assert!(outcome.storage.error().is_none());
        assert_eq!(
            outcome.report(),
            "Mean: 2.5\nMedian: 2.5\nStatistics stored in the database with ID: 1"
        );
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_statistics() {
        let sink = FailingSink::default();
        let engine = StatisticsEngine::new(StatisticsPipeline::new(inline("10,20,30"), sink.clone()));

        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome.statistics.mean, 20.0);
        assert_eq!(outcome.statistics.median, 20.0);
        assert_eq!(outcome.record_id(), UNSTORED_ID);
        assert!(matches!(
            outcome.storage.error(),
            Some(StatsError::Persistence { .. })
        ));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
        assert!(outcome.report().ends_with("ID: -1"));
    }

    #[tokio::test]
    async fn test_parse_error_skips_persistence() {
        let sink = FailingSink::default();
        let engine = StatisticsEngine::new(StatisticsPipeline::new(inline("1,abc"), sink.clone()));

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, StatsError::Parse { .. }));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_file_skips_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FailingSink::default();
        let source = InputSource::File(dir.path().join("nope.txt"));
        let engine = StatisticsEngine::new(StatisticsPipeline::new(source, sink.clone()));

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, StatsError::Io { .. }));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }
}
