use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where the comma-separated numbers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    File(PathBuf),
}

/// Unparsed comma-separated numbers, exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput(String);

impl RawInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parsed integers in input order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSequence(Vec<i64>);

impl NumberSequence {
    /// Returns `None` for an empty vector.
    pub fn from_vec(values: Vec<i64>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self(values))
        }
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub mean: f64,
    pub median: f64,
}

impl fmt::Display for StatisticsResult {
    // `{:?}` keeps the decimal point on whole values ("5.0", not "5").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean: {:?}", self.mean)?;
        write!(f, "Median: {:?}", self.median)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub statistics: StatisticsResult,
}
