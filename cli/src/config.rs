use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DATABASE: &str = "job-board";

#[derive(Debug, PartialEq)]
pub struct MongoSettings {
    pub connection_url: String,
    pub database: String,
}

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    /// Favorites are only persisted when a database is configured
    pub mongodb: Option<MongoSettings>,
}

impl Settings {
    pub fn from_env(url: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok(), url, timeout_secs)
    }

    fn from_lookup<F>(lookup: F, url: Option<String>, timeout_secs: Option<u64>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = url
            .or_else(|| lookup("JOB_BOARD_URL"))
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .ok_or(Error::MissingSetting("JOB_BOARD_URL"))?;
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(Error::InvalidSetting {
                name: "JOB_BOARD_URL",
                value: base_url,
            });
        }

        let timeout_secs = match timeout_secs {
            Some(secs) => secs,
            None => match lookup("JOB_BOARD_TIMEOUT_SECS") {
                Some(value) => value.trim().parse().map_err(|_| Error::InvalidSetting {
                    name: "JOB_BOARD_TIMEOUT_SECS",
                    value,
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(Error::InvalidSetting {
                name: "JOB_BOARD_TIMEOUT_SECS",
                value: "0".to_owned(),
            });
        }

        let mongodb = lookup("MONGODB_CONNECTION_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|connection_url| MongoSettings {
                connection_url,
                database: lookup("DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_owned()),
            });

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            mongodb,
        })
    }
}
