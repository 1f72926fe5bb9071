pub mod etl;
pub mod input;
pub mod pipeline;
pub mod statistics;

pub use crate::domain::model::{InputSource, RawInput, StatisticsResult, StoredRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ResultSink};
pub use crate::utils::error::Result;
