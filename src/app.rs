use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::error;

use crate::{
  action::Action,
  components::{
    Component,
    instruction_footer::{INSTRUCTIONS, InstructionFooter},
    polled_list::{ListConfig, PolledList},
  },
  config::Config,
  tui::{self, Frame, Tui},
};

/// Where the two lists are mounted, left to right.
pub const MOUNT_POINTS: [&str; 2] = ["react", "targets"];

pub struct App {
  pub lists: Vec<Box<dyn Component>>,
  pub footer: InstructionFooter,
  pub focused: usize,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub tick_rate: f64,
  pub frame_rate: f64,
}

impl App {
  pub fn new(config: &Config, tick_rate: f64, frame_rate: f64) -> Result<Self> {
    let mut lists: Vec<Box<dyn Component>> = Vec::with_capacity(MOUNT_POINTS.len());
    for mount in MOUNT_POINTS {
      let settings = config.list(mount).ok_or_else(|| eyre!("No list configured for mount point `{}`", mount))?;
      let list_config = ListConfig::new(
        settings.address.clone(),
        Duration::from_millis(settings.poll_interval_ms),
        settings.variant.renderer(),
      )?;
      lists.push(Box::new(PolledList::new(mount, settings.title.clone(), list_config)));
    }
    Ok(Self::with_lists(lists, tick_rate, frame_rate))
  }

  pub fn with_lists(lists: Vec<Box<dyn Component>>, tick_rate: f64, frame_rate: f64) -> Self {
    let mut app = Self {
      lists,
      footer: InstructionFooter::default(),
      focused: 0,
      should_quit: false,
      should_suspend: false,
      tick_rate,
      frame_rate,
    };
    app.set_focus(0);
    app
  }

  fn set_focus(&mut self, index: usize) {
    self.focused = index;
    for (i, list) in self.lists.iter_mut().enumerate() {
      list.focus(i == index);
    }
  }

  fn focus_next(&mut self) {
    if self.lists.is_empty() {
      return;
    }
    self.set_focus((self.focused + 1) % self.lists.len());
  }

  pub fn mount(&mut self, action_tx: &UnboundedSender<Action>) -> Result<()> {
    for list in self.lists.iter_mut() {
      list.register_action_handler(action_tx.clone())?;
    }
    Ok(())
  }

  pub fn unmount(&mut self) {
    for list in self.lists.iter_mut() {
      list.unmount();
    }
  }

  /// Applies the app-level part of an action, then hands it to every list.
  pub async fn dispatch(&mut self, action: Action, action_tx: &UnboundedSender<Action>) -> Result<()> {
    match &action {
      Action::Quit => {
        self.should_quit = true;
        self.unmount();
      },
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      Action::FocusNext => {
        self.focus_next();
        action_tx.send(Action::Render)?;
      },
      Action::Error(message) => error!("{}", message),
      _ => {},
    }
    for list in self.lists.iter_mut() {
      if let Some(next) = list.update(action.clone()).await? {
        action_tx.send(next)?;
      }
    }
    Ok(())
  }

  pub fn draw(&mut self, frame: &mut Frame<'_>) -> Result<()> {
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(3)])
      .split(frame.area());
    let panes = Layout::default()
      .direction(Direction::Horizontal)
      .constraints(vec![Constraint::Ratio(1, self.lists.len().max(1) as u32); self.lists.len()])
      .split(rows[0]);

    for (list, area) in self.lists.iter_mut().zip(panes.iter()) {
      list.draw(frame, *area)?;
    }
    self.footer.render(frame, rows[1], &INSTRUCTIONS);
    Ok(())
  }

  fn render(&mut self, tui: &mut Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
    tui.draw(|f| {
      if let Err(e) = self.draw(f) {
        let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", e)));
      }
    })?;
    Ok(())
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = tui::Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
    tui.enter()?;

    self.mount(&action_tx)?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(action) = key_action(key) {
              action_tx.send(action)?;
            }
          },
          _ => {},
        }

        if let Some(list) = self.lists.get_mut(self.focused) {
          if let Some(action) = list.handle_events(Some(e.clone())).await? {
            action_tx.send(action)?;
          }
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }
        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui, &action_tx)?;
          },
          Action::Render => self.render(&mut tui, &action_tx)?,
          _ => {},
        }
        self.dispatch(action, &action_tx).await?;
      }

      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }
}

/// Keys handled by the app itself rather than the focused list.
pub fn key_action(key: KeyEvent) -> Option<Action> {
  match key {
    KeyEvent { code: KeyCode::Char('q'), modifiers: _, state: _, kind: _ } => Some(Action::Quit),
    KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, state: _, kind: _ } => {
      Some(Action::Quit)
    },
    KeyEvent { code: KeyCode::Char('z' | 'Z'), modifiers: KeyModifiers::CONTROL, state: _, kind: _ } => {
      Some(Action::Suspend)
    },
    KeyEvent { code: KeyCode::Tab, modifiers: _, state: _, kind: _ } => Some(Action::FocusNext),
    _ => None,
  }
}
