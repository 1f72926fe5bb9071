use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No input source given (expected --input or --file)")]
    MissingInput,

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Empty input file: {}", path.display())]
    EmptyInput { path: PathBuf },

    #[error("Invalid number '{token}' at position {position}: {reason}")]
    Parse {
        token: String,
        position: usize,
        reason: String,
    },

    #[error("Failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Input,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 計算成功，只是沒有寫入資料庫
    Low,
    Medium,
    High,
    Critical,
}

impl StatsError {
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        StatsError::Persistence {
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::MissingInput | StatsError::InvalidArgument { .. } => ErrorCategory::Usage,
            StatsError::EmptyInput { .. } | StatsError::Parse { .. } | StatsError::Io { .. } => {
                ErrorCategory::Input
            }
            StatsError::Persistence { .. } => ErrorCategory::Storage,
            StatsError::ConfigValidation { .. }
            | StatsError::MissingConfig { .. }
            | StatsError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Storage => ErrorSeverity::Low,
            ErrorCategory::Usage => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Usage errors are answered with the usage line rather than a message.
    pub fn shows_usage(&self) -> bool {
        self.category() == ErrorCategory::Usage
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StatsError::MissingInput => "No input given.".to_string(),
            StatsError::InvalidArgument { message } => message.clone(),
            StatsError::EmptyInput { .. } => "Empty input file.".to_string(),
            StatsError::Parse { .. } => format!("Invalid input format. {}", self),
            StatsError::Io { source, .. } => format!("Error reading input file: {}", source),
            StatsError::Persistence { message } => {
                format!("Error storing statistics in the database: {}", message)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StatsError::MissingInput | StatsError::InvalidArgument { .. } => {
                "Pass exactly one of --input <numbers> or --file <file-path>"
            }
            StatsError::EmptyInput { .. } => {
                "Put the comma-separated numbers on the first line of the file"
            }
            StatsError::Parse { .. } => "Use whole numbers separated by commas, e.g. 1,2,3",
            StatsError::Io { .. } => "Check that the file exists and is readable",
            StatsError::Persistence { .. } => {
                "Check the database settings and that the Statistics table exists"
            }
            StatsError::ConfigValidation { .. }
            | StatsError::MissingConfig { .. }
            | StatsError::InvalidConfigValue { .. } => {
                "Fix the [database] section of the config file or the STATS_DB_* variables"
            }
        }
    }
}

impl From<sqlx::Error> for StatsError {
    fn from(err: sqlx::Error) -> Self {
        StatsError::persistence(err)
    }
}

#[cfg(feature = "cli")]
impl From<clap::Error> for StatsError {
    fn from(err: clap::Error) -> Self {
        let rendered = err.to_string();
        let message = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();
        StatsError::InvalidArgument { message }
    }
}
