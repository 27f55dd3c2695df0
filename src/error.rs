use thiserror::Error;

pub type Result<T> = std::result::Result<T, SiftError>;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Input path not found: {0}")]
    PathNotFound(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SiftError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
