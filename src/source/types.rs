use crate::{error::Error, record::Record};

/// Where a polled list gets its records from.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
  /// Reads the full current sequence of records.
  async fn fetch_records(&self) -> Result<Vec<Record>, Error>;
}
