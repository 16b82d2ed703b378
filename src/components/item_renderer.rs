use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{display_node::DisplayNode, polled_list::ListState};
use crate::record::{Record, title_of};

/// Maps one record and its index to the node that displays it.
pub type ItemRenderer = Arc<dyn Fn(&Record, usize) -> DisplayNode + Send + Sync>;

pub const PLACEHOLDER_TEXT: &str = "Loading...";

/// Turns the held records into display nodes.
///
/// Absent data yields a single placeholder. Present data, even an empty sequence, yields exactly
/// one node per record in input order, each keyed by its index.
pub fn render(state: &ListState, item_renderer: &ItemRenderer) -> Vec<DisplayNode> {
  match &state.data {
    Some(records) => {
      records.iter().enumerate().map(|(index, record)| item_renderer(record, index).keyed(index)).collect()
    },
    None => vec![DisplayNode::placeholder(PLACEHOLDER_TEXT)],
  }
}

/// The built-in per-item renderers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemVariant {
  /// The record's title as a heading.
  #[default]
  Plain,
  /// The record's title as a link. No navigation target is attached.
  Linked,
}

impl ItemVariant {
  pub fn renderer(self) -> ItemRenderer {
    match self {
      ItemVariant::Plain => Arc::new(plain_item),
      ItemVariant::Linked => Arc::new(linked_item),
    }
  }
}

pub fn plain_item(record: &Record, index: usize) -> DisplayNode {
  DisplayNode::heading(title_of(record), index)
}

pub fn linked_item(record: &Record, index: usize) -> DisplayNode {
  DisplayNode::link(title_of(record), None, index)
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;
  use crate::components::display_node::NodeKind;

  fn present(records: Vec<Record>) -> ListState {
    ListState { data: Some(records) }
  }

  #[test]
  fn test_render_absent_data_is_single_placeholder() {
    let nodes = render(&ListState::default(), &ItemVariant::Plain.renderer());

    assert_eq!(nodes, vec![DisplayNode::placeholder(PLACEHOLDER_TEXT)]);
  }

  #[test]
  fn test_render_empty_data_has_no_nodes() {
    let nodes = render(&present(vec![]), &ItemVariant::Plain.renderer());

    assert!(nodes.is_empty());
  }

  #[test]
  fn test_render_keeps_order_and_keys_by_index() {
    let records = vec![json!({ "title": "c" }), json!({ "title": "a" }), json!({ "title": "b" })];

    let nodes = render(&present(records), &ItemVariant::Plain.renderer());

    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes.iter().map(|node| node.text.as_str()).collect::<Vec<_>>(), vec!["c", "a", "b"]);
    assert_eq!(nodes.iter().map(|node| node.key).collect::<Vec<_>>(), vec![Some(0), Some(1), Some(2)]);
  }

  #[test]
  fn test_render_keys_by_index_even_for_custom_renderers() {
    let renderer: ItemRenderer = Arc::new(|record: &Record, _index: usize| DisplayNode::heading(title_of(record), 99));

    let nodes = render(&present(vec![json!({ "title": "a" }), json!({ "title": "b" })]), &renderer);

    assert_eq!(nodes.iter().map(|node| node.key).collect::<Vec<_>>(), vec![Some(0), Some(1)]);
  }

  #[test]
  fn test_plain_variant_renders_heading() {
    let nodes = render(&present(vec![json!({ "title": "A" })]), &ItemVariant::Plain.renderer());

    assert_eq!(nodes, vec![DisplayNode::heading("A", 0)]);
  }

  #[test]
  fn test_linked_variant_renders_link_without_target() {
    let nodes = render(&present(vec![json!({ "title": "A" })]), &ItemVariant::Linked.renderer());

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].text, "A");
    assert_eq!(nodes[0].kind, NodeKind::Link { target: None });
  }

  #[test]
  fn test_variant_names() {
    assert_eq!(ItemVariant::from_str("linked").unwrap(), ItemVariant::Linked);
    assert_eq!(ItemVariant::Plain.to_string(), "plain");
    assert_eq!(serde_json::from_str::<ItemVariant>("\"linked\"").unwrap(), ItemVariant::Linked);
  }
}
