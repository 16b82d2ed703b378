use std::{
  collections::VecDeque,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use async_trait::async_trait;

use crate::{error::Error, record::Record, source::types::RecordSource};

#[derive(Debug, Clone)]
pub enum MockResponse {
  Records { records: Vec<Record>, delay: Duration },
  Failure,
}

/// Plays back scripted responses in call order, then keeps answering with `fallback`.
#[derive(Debug, Default)]
pub struct MockRecordSource {
  script: Mutex<VecDeque<MockResponse>>,
  fallback: Vec<Record>,
  calls: AtomicUsize,
}

impl MockRecordSource {
  pub fn new(fallback: Vec<Record>) -> Self {
    MockRecordSource { fallback, ..Default::default() }
  }

  pub fn scripted(script: Vec<MockResponse>, fallback: Vec<Record>) -> Self {
    MockRecordSource { script: Mutex::new(script.into()), fallback, calls: AtomicUsize::new(0) }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl RecordSource for MockRecordSource {
  async fn fetch_records(&self) -> Result<Vec<Record>, Error> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let next = self.script.lock().unwrap().pop_front();
    match next {
      Some(MockResponse::Records { records, delay }) => {
        tokio::time::sleep(delay).await;
        Ok(records)
      },
      Some(MockResponse::Failure) => Err(Error::Status { address: "mock".to_string(), status: 500 }),
      None => Ok(self.fallback.clone()),
    }
  }
}
