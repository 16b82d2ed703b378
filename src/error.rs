use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("request to {address} failed: {source}")]
  Request { address: String, source: reqwest::Error },
  #[error("{address} responded with status {status}")]
  Status { address: String, status: u16 },
  #[error("{address} did not return a JSON array: {source}")]
  Decode { address: String, source: serde_json::Error },
  #[error("invalid address {0}")]
  Address(String),
  #[error("poll interval must be greater than zero")]
  ZeroInterval,
}
