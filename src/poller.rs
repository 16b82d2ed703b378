use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{error::Error, record::Record, source::RecordSource};

/// Repeatedly fetches records from a source on a fixed interval.
///
/// Every tick spawns its own fetch, so a slow response may overlap later ticks and results are
/// delivered in the order fetches complete rather than the order they were issued. Failed fetches
/// are dropped without reaching the callback.
pub struct Poller {
  source: Arc<dyn RecordSource>,
  period: Duration,
}

impl Poller {
  pub fn new(source: Arc<dyn RecordSource>, period: Duration) -> Result<Self, Error> {
    if period.is_zero() {
      return Err(Error::ZeroInterval);
    }
    Ok(Poller { source, period })
  }

  pub fn period(&self) -> Duration {
    self.period
  }

  /// Fetches once immediately and then at every `period` boundary until the returned handle is
  /// stopped or dropped.
  pub fn start<F>(&self, on_records: F) -> PollHandle
  where
    F: Fn(Vec<Record>) + Send + Sync + 'static,
  {
    let cancellation_token = CancellationToken::new();
    let token = cancellation_token.clone();
    let source = self.source.clone();
    let on_records = Arc::new(on_records);
    let period = self.period;

    let task = tokio::spawn(async move {
      let mut ticker = interval(period);
      loop {
        tokio::select! {
          _ = token.cancelled() => break,
          _ = ticker.tick() => {
            tokio::spawn(fetch(source.clone(), on_records.clone()));
          },
        }
      }
      debug!("Poll timer stopped");
    });

    PollHandle { cancellation_token, task }
  }
}

async fn fetch<F>(source: Arc<dyn RecordSource>, on_records: Arc<F>)
where
  F: Fn(Vec<Record>) + Send + Sync + 'static,
{
  match source.fetch_records().await {
    Ok(records) => on_records(records),
    Err(err) => trace!("Dropping failed fetch: {}", err),
  }
}

/// Owns a running poll timer. Stopping or dropping it ends the timer; fetches already in flight
/// still complete.
pub struct PollHandle {
  cancellation_token: CancellationToken,
  task: JoinHandle<()>,
}

impl PollHandle {
  pub fn stop(&self) {
    self.cancellation_token.cancel();
  }

  pub fn is_stopped(&self) -> bool {
    self.cancellation_token.is_cancelled() || self.task.is_finished()
  }
}

impl Drop for PollHandle {
  fn drop(&mut self) {
    self.stop();
  }
}
