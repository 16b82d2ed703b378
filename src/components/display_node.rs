use ratatui::{
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::ListItem,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
  Placeholder,
  Heading,
  /// A link-like node. `target` is where it would navigate to, if anywhere.
  Link { target: Option<String> },
}

/// One renderable entry of a list.
///
/// Item nodes carry the index of the record they came from as their key; the placeholder has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
  pub key: Option<usize>,
  pub kind: NodeKind,
  pub text: String,
}

impl DisplayNode {
  pub fn placeholder(text: impl Into<String>) -> Self {
    DisplayNode { key: None, kind: NodeKind::Placeholder, text: text.into() }
  }

  pub fn heading(text: impl Into<String>, key: usize) -> Self {
    DisplayNode { key: Some(key), kind: NodeKind::Heading, text: text.into() }
  }

  pub fn link(text: impl Into<String>, target: Option<String>, key: usize) -> Self {
    DisplayNode { key: Some(key), kind: NodeKind::Link { target }, text: text.into() }
  }

  pub fn keyed(mut self, key: usize) -> Self {
    self.key = Some(key);
    self
  }

  pub fn to_list_item(&self) -> ListItem<'static> {
    let line = match &self.kind {
      NodeKind::Placeholder => Line::from(Span::styled(
        self.text.clone(),
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
      )),
      NodeKind::Heading => Line::from(Span::styled(self.text.clone(), Style::default().add_modifier(Modifier::BOLD))),
      NodeKind::Link { target } => {
        let mut parts =
          vec![Span::styled(self.text.clone(), Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED))];
        if let Some(target) = target {
          parts.push(Span::styled(format!(" ({})", target), Style::default().add_modifier(Modifier::DIM)));
        }
        Line::from(parts)
      },
    };
    ListItem::from(line)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_keyed_overrides_key() {
    let node = DisplayNode::heading("A", 7).keyed(2);

    assert_eq!(node.key, Some(2));
  }

  #[test]
  fn test_render_heading() {
    let rendered = DisplayNode::heading("A", 0).to_list_item();

    assert_eq!(rendered, ListItem::new(Span::from("A").style(Style::default().add_modifier(Modifier::BOLD))));
  }

  #[test]
  fn test_render_placeholder() {
    let rendered = DisplayNode::placeholder("Loading...").to_list_item();

    assert_eq!(
      rendered,
      ListItem::new(Span::from("Loading...").style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)))
    );
  }

  #[test]
  fn test_render_link_without_target() {
    let rendered = DisplayNode::link("A", None, 0).to_list_item();

    assert_eq!(
      rendered,
      ListItem::new(
        Span::from("A").style(Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED))
      )
    );
  }

  #[test]
  fn test_render_link_with_target() {
    let rendered = DisplayNode::link("A", Some("https://example.com/a".to_string()), 0).to_list_item();

    assert_eq!(
      rendered,
      ListItem::new(Line::from_iter([
        Span::from("A").style(Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED)),
        Span::from(" (https://example.com/a)").style(Style::default().add_modifier(Modifier::DIM)),
      ]))
    );
  }
}
