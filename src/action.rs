use serde::{Deserialize, Serialize};
use strum::Display;

use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  Error(String),
  FocusNext,
  Quit,
  /// Full replacement of the records held by the list mounted at `list`.
  RecordsLoaded {
    list: String,
    records: Vec<Record>,
  },
  Render,
  Resize(u16, u16),
  Resume,
  SelectNext,
  SelectPrevious,
  Suspend,
  Tick,
}
