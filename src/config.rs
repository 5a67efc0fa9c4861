use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding the persisted collections (one JSON file per key).
    /// Default: ./data
    pub data_dir: PathBuf,

    /// Directory for rotating log files.
    /// Default: ./logs
    pub log_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Optional environment variables:
    /// - DATA_DIR: where the collection files live (default: ./data)
    /// - LOG_DIR: where log files are written (default: ./logs)
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());

        Ok(Config { data_dir, log_dir })
    }
}
