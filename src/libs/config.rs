//! Configuration management for the rekod application.
//!
//! The configuration is a small JSON file in the platform data directory
//! holding the active user. It is the CLI analogue of a login session:
//! every command that touches records resolves the current user from
//! here. `rekod init` runs the interactive setup wizard.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// The active user identity stored in the configuration file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserConfig {
    pub username: String,
    pub full_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub user: Option<UserConfig>,
}

impl Config {
    /// Reads the configuration file, or returns defaults when none exists.
    pub fn read() -> Result<Self> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let file = File::open(&config_path)?;
        let config = serde_json::from_reader(file).map_err(|_| msg_error_anyhow!(Message::ConfigParseError))?;
        Ok(config)
    }

    /// Writes the configuration file to the platform data directory.
    pub fn save(&self) -> Result<()> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        fs::write(&config_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Interactive setup wizard; prompts for the active user identity.
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;

        let theme = ColorfulTheme::default();
        let username: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptUsername.to_string())
            .with_initial_text(config.user.as_ref().map(|u| u.username.clone()).unwrap_or_default())
            .interact_text()?;
        let full_name: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptFullName.to_string())
            .with_initial_text(config.user.as_ref().map(|u| u.full_name.clone()).unwrap_or_default())
            .interact_text()?;

        config.user = Some(UserConfig {
            username: username.trim().to_string(),
            full_name: full_name.trim().to_string(),
        });
        Ok(config)
    }

    /// Returns the configured active user or fails with a setup hint.
    pub fn active_user(&self) -> Result<&UserConfig> {
        self.user.as_ref().ok_or_else(|| msg_error_anyhow!(Message::ConfigUserMissing))
    }
}
