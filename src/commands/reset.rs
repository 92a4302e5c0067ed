use crate::libs::messages::Message;
use crate::libs::storage::Storage;
use crate::{msg_print, msg_success};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Deletes every locally stored document after confirmation.
pub async fn cmd() -> Result<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmReset.to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_print!(Message::ResetCancelled);
        return Ok(());
    }

    Storage::new().clear_all().await?;
    msg_success!(Message::DataCleared);
    Ok(())
}
