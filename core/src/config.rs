use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::repository::FileRecordSource;

pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub data_file: PathBuf,
    /// Length of the trailing reporting window.
    pub window_months: u32,
}

impl AnalyticsConfig {
    /// Reads `MAINTLOG_DATA_FILE` and `MAINTLOG_WINDOW_MONTHS`, falling back
    /// to `~/.maintlog/maintenance.json` and twelve months.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            env::var("MAINTLOG_DATA_FILE").ok(),
            env::var("MAINTLOG_WINDOW_MONTHS").ok(),
        )
    }

    fn from_vars(data_file: Option<String>, window_months: Option<String>) -> Result<Self> {
        let data_file = match data_file {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => FileRecordSource::default_path()?,
        };
        let window_months = match window_months {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid MAINTLOG_WINDOW_MONTHS: {}", raw))?,
            None => DEFAULT_WINDOW_MONTHS,
        };
        Ok(Self {
            data_file,
            window_months,
        })
    }
}
