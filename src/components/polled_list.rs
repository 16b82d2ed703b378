use std::{sync::Arc, time::Duration};

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
  layout::Rect,
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, List, ListItem, ListState as TuiListState},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::{
  Component,
  display_node::DisplayNode,
  item_renderer::{ItemRenderer, render},
};
use crate::{
  action::Action,
  error::Error,
  poller::{PollHandle, Poller},
  record::Record,
  source::{HttpRecordSource, RecordSource},
  tui::Frame,
};

/// Where a list polls, how often, and how it draws each record. Fixed for the life of the list.
#[derive(Clone)]
pub struct ListConfig {
  pub address: String,
  pub poll_interval: Duration,
  pub item_renderer: ItemRenderer,
}

impl ListConfig {
  pub fn new(address: impl Into<String>, poll_interval: Duration, item_renderer: ItemRenderer) -> Result<Self, Error> {
    let address = address.into();
    if poll_interval.is_zero() {
      return Err(Error::ZeroInterval);
    }
    Ok(ListConfig { address, poll_interval, item_renderer })
  }
}

/// Records held by a list. `None` until the first successful fetch, never `None` again after.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListState {
  pub data: Option<Vec<Record>>,
}

impl ListState {
  pub fn replace(&mut self, records: Vec<Record>) {
    self.data = Some(records);
  }

  pub fn record_count(&self) -> usize {
    self.data.as_ref().map_or(0, Vec::len)
  }
}

/// A list that keeps itself fresh by polling and draws every record through its item renderer.
pub struct PolledList {
  id: String,
  title: String,
  config: ListConfig,
  source: Arc<dyn RecordSource>,
  poll_handle: Option<PollHandle>,
  state: ListState,
  list_state: TuiListState,
  focused: bool,
}

impl PolledList {
  pub fn new(id: impl Into<String>, title: impl Into<String>, config: ListConfig) -> Self {
    let source = Arc::new(HttpRecordSource::new(config.address.clone()));
    Self::with_source(id, title, config, source)
  }

  pub fn with_source(
    id: impl Into<String>,
    title: impl Into<String>,
    config: ListConfig,
    source: Arc<dyn RecordSource>,
  ) -> Self {
    PolledList {
      id: id.into(),
      title: title.into(),
      config,
      source,
      poll_handle: None,
      state: ListState::default(),
      list_state: TuiListState::default(),
      focused: false,
    }
  }

  pub fn state(&self) -> &ListState {
    &self.state
  }

  pub fn is_polling(&self) -> bool {
    self.poll_handle.as_ref().is_some_and(|handle| !handle.is_stopped())
  }

  pub fn nodes(&self) -> Vec<DisplayNode> {
    render(&self.state, &self.config.item_renderer)
  }

  fn select_next(&mut self) {
    let count = self.state.record_count();
    if count == 0 {
      return;
    }
    let next_index = match self.list_state.selected() {
      Some(current_index) if current_index + 1 < count => current_index + 1,
      Some(_) => 0,
      None => 0,
    };
    self.list_state.select(Some(next_index));
  }

  fn select_previous(&mut self) {
    let count = self.state.record_count();
    if count == 0 {
      return;
    }
    let prev_index = match self.list_state.selected() {
      Some(0) | None => count - 1,
      Some(current_index) => (current_index - 1).min(count - 1),
    };
    self.list_state.select(Some(prev_index));
  }

  fn clamp_selection(&mut self) {
    let count = self.state.record_count();
    match self.list_state.selected() {
      _ if count == 0 => self.list_state.select(None),
      Some(index) if index >= count => self.list_state.select(Some(count - 1)),
      _ => {},
    }
  }
}

#[async_trait::async_trait]
impl Component for PolledList {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    if self.is_polling() {
      debug!("`{}` is already mounted, restarting its poller", self.id);
    }
    let poller = Poller::new(self.source.clone(), self.config.poll_interval)?;
    info!("Mounting `{}`, polling {} every {:?}", self.id, self.config.address, poller.period());
    let list = self.id.clone();
    let handle = poller.start(move |records| {
      if let Err(e) = tx.send(Action::RecordsLoaded { list: list.clone(), records }) {
        debug!("`{}` is no longer listening for records: {}", list, e);
      }
    });
    if let Some(previous) = self.poll_handle.replace(handle) {
      previous.stop();
    }
    Ok(())
  }

  fn unmount(&mut self) {
    if let Some(handle) = self.poll_handle.take() {
      info!("Unmounting `{}`", self.id);
      handle.stop();
    }
  }

  fn focus(&mut self, focused: bool) {
    self.focused = focused;
  }

  async fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    let action = match key {
      KeyEvent { code: KeyCode::Down, modifiers: KeyModifiers::NONE, kind: _, state: _ } => Some(Action::SelectNext),
      KeyEvent { code: KeyCode::Up, modifiers: KeyModifiers::NONE, kind: _, state: _ } => Some(Action::SelectPrevious),
      _ => None,
    };
    Ok(action)
  }

  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::RecordsLoaded { list, records } if list == self.id => {
        debug!("`{}` received {} records", self.id, records.len());
        self.state.replace(records);
        self.clamp_selection();
        Ok(Some(Action::Render))
      },
      Action::SelectNext if self.focused => {
        self.select_next();
        Ok(Some(Action::Render))
      },
      Action::SelectPrevious if self.focused => {
        self.select_previous();
        Ok(Some(Action::Render))
      },
      _ => Ok(None),
    }
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    self.clamp_selection();
    let render_items: Vec<ListItem> = self.nodes().iter().map(DisplayNode::to_list_item).collect();
    let border_style = if self.focused { Style::default().fg(Color::Cyan) } else { Style::default() };

    let list = List::new(render_items)
      .block(Block::default().title(self.title.clone()).borders(Borders::ALL).border_style(border_style))
      .style(Style::default().fg(Color::White))
      .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
      .highlight_symbol("→")
      .repeat_highlight_symbol(true);
    f.render_stateful_widget(list, area, &mut self.list_state);
    Ok(())
  }
}

impl Drop for PolledList {
  fn drop(&mut self) {
    self.unmount();
  }
}
