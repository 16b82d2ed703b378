use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};

use crate::{
  app::App,
  cli::Cli,
  config::Config,
  utils::{initialize_logging, initialize_panic_handler},
};

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod poller;
pub mod record;
pub mod source;
pub mod tui;
pub mod utils;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let args = Cli::parse();
  let mut config = Config::new()?;
  info!("Using config dir {:?}, data dir {:?}", config.config._config_dir, config.config._data_dir);

  let overrides = [("react", args.react_address), ("targets", args.targets_address)];
  for (mount, address) in overrides {
    if let Some(address) = address {
      if !config.override_address(mount, address) {
        warn!("No list is mounted at `{}`, ignoring its address override", mount);
      }
    }
  }

  let mut app = App::new(&config, args.tick_rate, args.frame_rate)?;
  app.run().await?;

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
