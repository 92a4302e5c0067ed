use crate::libs::messages::Message;
use crate::libs::storage::Storage;
use crate::store::settings::{NotificationKind, Settings, SettingsPatch, Theme};
use crate::{msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    #[command(about = "Show current settings")]
    Show,
    #[command(about = "Set the user name")]
    Name {
        name: String,
    },
    #[command(about = "Toggle between light and dark theme")]
    Theme,
    #[command(about = "Toggle a notification preference")]
    Notifications {
        #[arg(value_enum)]
        kind: NotificationKind,
    },
}

pub async fn cmd(args: SettingsArgs) -> Result<()> {
    let storage = Storage::new();
    let mut settings = Settings::load(&storage).await;
    if settings.load_failed() {
        msg_warning!(Message::StorageLoadDegraded("settings".to_string()));
    }

    match args.command {
        SettingsCommand::Show => {
            let current = settings.current();
            let name = if current.user_name.is_empty() { "(not set)" } else { &current.user_name };
            println!("Name:                {}", name);
            println!("Theme:               {:?}", current.theme);
            println!(
                "Class reminders:     {}",
                on_off(current.notification_preferences.class_reminders)
            );
            println!(
                "Assignment alerts:   {}",
                on_off(current.notification_preferences.assignment_alerts)
            );
            return Ok(());
        }
        SettingsCommand::Name { name } => {
            settings.update(SettingsPatch {
                user_name: Some(name),
                ..Default::default()
            });
            msg_success!(Message::SettingsSaved);
        }
        SettingsCommand::Theme => {
            settings.toggle_theme();
            let theme = match settings.current().theme {
                Theme::Light => "light",
                Theme::Dark => "dark",
            };
            msg_success!(Message::ThemeSwitched(theme.to_string()));
        }
        SettingsCommand::Notifications { kind } => {
            settings.toggle_notification(kind);
            let prefs = settings.current().notification_preferences;
            let (label, enabled) = match kind {
                NotificationKind::ClassReminders => ("Class reminder", prefs.class_reminders),
                NotificationKind::AssignmentAlerts => ("Assignment alert", prefs.assignment_alerts),
            };
            msg_success!(Message::NotificationToggled(label.to_string(), enabled));
        }
    }

    settings.flush().await;
    if let Some(detail) = settings.take_write_error() {
        msg_warning!(Message::StorageWriteFailed(detail));
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
