pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::DatabaseConfig;

pub use adapters::storage::{MemoryStore, SqlStatisticsStore};
pub use crate::core::{
    etl::{RunOutcome, StatisticsEngine, StorageOutcome},
    pipeline::StatisticsPipeline,
};
pub use utils::error::{Result, StatsError};
