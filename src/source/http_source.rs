use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::{
  Client, Url,
  header::{CACHE_CONTROL, PRAGMA},
};
use tracing::debug;

use crate::{error::Error, record::Record, source::types::RecordSource};

/// Reads records with a plain HTTP GET, always bypassing caches.
pub struct HttpRecordSource {
  address: String,
  client: Client,
}

impl HttpRecordSource {
  pub fn new(address: impl Into<String>) -> Self {
    HttpRecordSource { address: address.into(), client: Client::new() }
  }

  fn cache_busted_url(&self) -> Result<Url, Error> {
    let mut url = Url::parse(&self.address).map_err(|_| Error::Address(self.address.clone()))?;
    let stamp = SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis()).unwrap_or_default();
    url.query_pairs_mut().append_pair("_", &stamp.to_string());
    Ok(url)
  }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
  async fn fetch_records(&self) -> Result<Vec<Record>, Error> {
    let url = self.cache_busted_url()?;
    debug!("GET {}", url);
    let response = self
      .client
      .get(url)
      .header(CACHE_CONTROL, "no-cache")
      .header(PRAGMA, "no-cache")
      .send()
      .await
      .map_err(|source| Error::Request { address: self.address.clone(), source })?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::Status { address: self.address.clone(), status: status.as_u16() });
    }

    let body = response.bytes().await.map_err(|source| Error::Request { address: self.address.clone(), source })?;
    serde_json::from_slice::<Vec<Record>>(&body).map_err(|source| Error::Decode { address: self.address.clone(), source })
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;
  use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
  };

  use super::*;

  /// Serves a single canned response and hands back the raw request it received.
  async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}/api/targets/", listener.local_addr().unwrap());
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
      let (mut stream, _) = listener.accept().await.unwrap();
      let mut request = Vec::new();
      let mut buf = [0u8; 1024];
      while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buf).await.unwrap();
        if read == 0 {
          break;
        }
        request.extend_from_slice(&buf[..read]);
      }
      let response = format!(
        "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
      );
      stream.write_all(response.as_bytes()).await.unwrap();
      stream.shutdown().await.unwrap();
      let _ = request_tx.send(String::from_utf8_lossy(&request).to_string());
    });

    (address, request_rx)
  }

  #[tokio::test]
  async fn test_fetch_records_parses_json_array() {
    let (address, _request) = serve_once("HTTP/1.1 200 OK", r#"[{"title":"A"},{"title":"B"}]"#).await;
    let source = HttpRecordSource::new(address);

    let records = source.fetch_records().await.unwrap();

    assert_eq!(records, vec![json!({ "title": "A" }), json!({ "title": "B" })]);
  }

  #[tokio::test]
  async fn test_fetch_records_bypasses_cache() {
    let (address, request) = serve_once("HTTP/1.1 200 OK", "[]").await;
    let source = HttpRecordSource::new(address);

    source.fetch_records().await.unwrap();
    let request = request.await.unwrap().to_lowercase();

    assert!(request.starts_with("get /api/targets/?_="));
    assert!(request.contains("cache-control: no-cache"));
    assert!(request.contains("pragma: no-cache"));
  }

  #[tokio::test]
  async fn test_fetch_records_rejects_non_success_status() {
    let (address, _request) = serve_once("HTTP/1.1 503 Service Unavailable", "[]").await;
    let source = HttpRecordSource::new(address);

    let result = source.fetch_records().await;

    assert!(matches!(result, Err(Error::Status { status: 503, .. })));
  }

  #[tokio::test]
  async fn test_fetch_records_rejects_non_array_body() {
    let (address, _request) = serve_once("HTTP/1.1 200 OK", r#"{"title":"A"}"#).await;
    let source = HttpRecordSource::new(address);

    let result = source.fetch_records().await;

    assert!(matches!(result, Err(Error::Decode { .. })));
  }

  #[tokio::test]
  async fn test_fetch_records_rejects_relative_address() {
    let source = HttpRecordSource::new("api/targets/");

    let result = source.fetch_records().await;

    assert!(matches!(result, Err(Error::Address(address)) if address == "api/targets/"));
  }
}
