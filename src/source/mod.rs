pub mod http_source;
#[cfg(test)]
pub mod mock_source;
pub mod types;

pub use http_source::HttpRecordSource;
pub use types::RecordSource;
