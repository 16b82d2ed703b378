use serde_json::Value;

/// One opaque JSON item returned by a polled address.
pub type Record = Value;

/// Text shown for a record's `title` field.
///
/// Strings are used verbatim, other values use their JSON text, and a missing or `null` title is empty.
pub fn title_of(record: &Record) -> String {
  match record.get("title") {
    Some(Value::String(title)) => title.clone(),
    Some(Value::Null) | None => String::new(),
    Some(other) => other.to_string(),
  }
}
