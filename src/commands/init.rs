use crate::db::users::Users;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_print, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {}

/// Runs the interactive setup wizard and ensures the user row exists.
pub fn cmd(_init_args: InitArgs) -> Result<()> {
    let config = Config::init()?;
    config.save()?;
    msg_success!(Message::ConfigSaved);

    let user_config = config.active_user()?;
    let mut users = Users::new()?;
    match users.get_by_username(&user_config.username)? {
        Some(user) => msg_print!(Message::UserWelcome(user.full_name)),
        None => {
            users.get_or_create(&user_config.username, &user_config.full_name)?;
            msg_success!(Message::UserCreated(user_config.username.clone()));
        }
    }

    Ok(())
}
