use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Setting not set: '{0}'")]
    MissingSetting(&'static str),
    #[error("Invalid value for setting '{name}': '{value}'")]
    InvalidSetting { name: &'static str, value: String },
    #[error("HTTP client error: '{0}'")]
    Http(#[from] reqwest::Error),
    #[error("Persistence error: '{0}'")]
    Persistence(#[from] persistence::Error),
    #[error("IO error: '{0}'")]
    Io(#[from] std::io::Error),
}
