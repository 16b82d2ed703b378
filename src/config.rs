use std::{collections::HashMap, path::PathBuf};

use config::ConfigError;
use serde::Deserialize;

use crate::{
  components::item_renderer::ItemVariant,
  utils::{PROJECT_NAME, get_config_dir, get_data_dir},
};

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub _data_dir: PathBuf,
  #[serde(default)]
  pub _config_dir: PathBuf,
}

/// Settings for the list mounted at one mount point.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ListSettings {
  pub title: String,
  pub address: String,
  pub poll_interval_ms: u64,
  #[serde(default)]
  pub variant: ItemVariant,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
  #[serde(default, flatten)]
  pub config: AppConfig,
  /// Keyed by mount point.
  #[serde(default)]
  pub lists: HashMap<String, ListSettings>,
}

impl Config {
  /// Layers the bundled defaults, user config files and `POLLBOARD_*` environment variables.
  pub fn new() -> Result<Self, ConfigError> {
    let data_dir = get_data_dir();
    let config_dir = get_config_dir();
    let mut builder = config::Config::builder()
      .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
      .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
      .set_default("_config_dir", config_dir.to_string_lossy().to_string())?;

    let config_files = [
      ("config.json5", config::FileFormat::Json5),
      ("config.json", config::FileFormat::Json),
      ("config.yaml", config::FileFormat::Yaml),
      ("config.toml", config::FileFormat::Toml),
      ("config.ini", config::FileFormat::Ini),
    ];
    for (file, format) in &config_files {
      builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
    }
    builder = builder.add_source(
      config::Environment::with_prefix(PROJECT_NAME.as_str()).prefix_separator("_").separator("__").try_parsing(true),
    );

    let cfg: Self = builder.build()?.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    for (mount, settings) in &self.lists {
      if settings.address.trim().is_empty() {
        return Err(ConfigError::Message(format!("lists.{mount}.address must not be empty")));
      }
      if settings.poll_interval_ms == 0 {
        return Err(ConfigError::Message(format!("lists.{mount}.poll_interval_ms must be greater than zero")));
      }
    }
    Ok(())
  }

  pub fn list(&self, mount: &str) -> Option<&ListSettings> {
    self.lists.get(mount)
  }

  /// Points the list at `mount` to a different address. Returns false when no such list is configured.
  pub fn override_address(&mut self, mount: &str, address: String) -> bool {
    match self.lists.get_mut(mount) {
      Some(settings) => {
        settings.address = address;
        true
      },
      None => false,
    }
  }
}
