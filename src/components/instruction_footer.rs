use ratatui::{
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

pub const INSTRUCTIONS: [&str; 4] = ["q: Quit", "tab: Next list", "↑/↓: Select", "^ + z: Suspend"];

#[derive(Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  /// Renders the footer with the provided instructions.
  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, instructions: &[&str]) {
    if instructions.is_empty() {
      return;
    }

    let text = instructions.join(" | ");
    let paragraph =
      Paragraph::new(text).block(Block::default().borders(Borders::ALL)).style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}

#[cfg(test)]
mod tests {
  use ratatui::{Terminal, backend::TestBackend};

  use super::*;

  #[test]
  fn test_render_joins_instructions() {
    let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
    let footer = InstructionFooter::default();

    terminal.draw(|f| footer.render(f, f.area(), &INSTRUCTIONS)).unwrap();
    let text: String = terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect();

    assert!(text.contains("q: Quit | tab: Next list"));
  }
}
