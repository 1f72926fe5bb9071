#[cfg(feature = "cli")]
pub mod cli;
pub mod database;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use database::DatabaseConfig;
