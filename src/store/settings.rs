//! User settings singleton and its store.
//!
//! Unlike the record stores this holds a single object. Updates carry
//! partial-merge semantics: only the fields present in the patch are
//! replaced, and the merged object is persisted as a whole.

use crate::libs::storage::{Storage, SETTINGS_KEY};
use crate::store::persister::Persister;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub class_reminders: bool,
    pub assignment_alerts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub user_name: String,
    pub theme: Theme,
    pub notification_preferences: NotificationPreferences,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            user_name: String::new(),
            theme: Theme::Light,
            notification_preferences: NotificationPreferences {
                class_reminders: true,
                assignment_alerts: true,
            },
        }
    }
}

/// Partial update: only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub user_name: Option<String>,
    pub theme: Option<Theme>,
    pub notification_preferences: Option<NotificationPreferences>,
}

/// Which notification flag to flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotificationKind {
    ClassReminders,
    AssignmentAlerts,
}

/// Pure shallow merge of a patch into the current settings.
pub fn merge(settings: UserSettings, patch: SettingsPatch) -> UserSettings {
    UserSettings {
        user_name: patch.user_name.unwrap_or(settings.user_name),
        theme: patch.theme.unwrap_or(settings.theme),
        notification_preferences: patch
            .notification_preferences
            .unwrap_or(settings.notification_preferences),
    }
}

pub struct Settings {
    settings: UserSettings,
    load_failed: bool,
    persister: Persister,
}

impl Settings {
    /// Loads the settings object, falling back to defaults when no
    /// document exists or the stored one is unreadable.
    pub async fn load(storage: &Storage) -> Self {
        let (settings, load_failed) = match storage.load::<UserSettings>(SETTINGS_KEY).await {
            Ok(loaded) => (loaded.unwrap_or_default(), false),
            Err(e) => {
                tracing::warn!(error = %e, "loading settings failed, using defaults");
                (UserSettings::default(), true)
            }
        };
        Settings {
            settings,
            load_failed,
            persister: Persister::spawn(storage.clone(), SETTINGS_KEY),
        }
    }

    pub fn current(&self) -> &UserSettings {
        &self.settings
    }

    /// Applies a partial update and persists the merged result.
    pub fn update(&mut self, patch: SettingsPatch) {
        self.settings = merge(std::mem::take(&mut self.settings), patch);
        self.persister.enqueue(&self.settings);
    }

    /// Flips between light and dark.
    pub fn toggle_theme(&mut self) {
        let theme = match self.settings.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.update(SettingsPatch {
            theme: Some(theme),
            ..Default::default()
        });
    }

    /// Flips one flag inside the notification preference map.
    pub fn toggle_notification(&mut self, kind: NotificationKind) {
        let mut prefs = self.settings.notification_preferences;
        match kind {
            NotificationKind::ClassReminders => prefs.class_reminders = !prefs.class_reminders,
            NotificationKind::AssignmentAlerts => prefs.assignment_alerts = !prefs.assignment_alerts,
        }
        self.update(SettingsPatch {
            notification_preferences: Some(prefs),
            ..Default::default()
        });
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn take_write_error(&self) -> Option<String> {
        self.persister.take_error().map(|e| e.to_string())
    }

    pub async fn flush(&self) {
        self.persister.flush().await;
    }
}
