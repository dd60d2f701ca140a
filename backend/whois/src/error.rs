use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhoisError {
    #[error("Request to WHOIS failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("WHOIS responded with status {0}")]
    Status(StatusCode),

    #[error("Malformed WHOIS response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown display field: {0}")]
    InvalidParameter(String),

    #[error("Record not found")]
    NotFound,

    #[error("Invalid WHOIS url: {0}")]
    InvalidUrl(String),
}
