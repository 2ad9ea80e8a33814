use crate::birthday::{Birthday, BirthdayError};
use serde::{Deserialize, Serialize};

/// Reminder preferences. Each field is independent; `enabled` is the
/// master switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub day_before: bool,
    pub week_before: bool,
    pub advance_signup: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            day_before: true,
            week_before: true,
            advance_signup: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationToggle {
    Enabled,
    DayBefore,
    WeekBefore,
    AdvanceSignup,
}

impl NotificationSettings {
    pub fn set(&mut self, toggle: NotificationToggle, value: bool) {
        match toggle {
            NotificationToggle::Enabled => self.enabled = value,
            NotificationToggle::DayBefore => self.day_before = value,
            NotificationToggle::WeekBefore => self.week_before = value,
            NotificationToggle::AdvanceSignup => self.advance_signup = value,
        }
    }

    pub fn get(&self, toggle: NotificationToggle) -> bool {
        match toggle {
            NotificationToggle::Enabled => self.enabled,
            NotificationToggle::DayBefore => self.day_before,
            NotificationToggle::WeekBefore => self.week_before,
            NotificationToggle::AdvanceSignup => self.advance_signup,
        }
    }

    /// A specific reminder fires only when the master switch is on too.
    pub fn is_active(&self, toggle: NotificationToggle) -> bool {
        self.enabled && self.get(toggle)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub birthday: Option<Birthday>,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl UserProfile {
    /// Builds a profile from the stored `birthday_month` / `birthday_day`
    /// columns.
    pub fn from_columns(
        birthday_month: Option<u32>,
        birthday_day: Option<u32>,
    ) -> Result<Self, BirthdayError> {
        Ok(Self {
            birthday: Birthday::from_parts(birthday_month, birthday_day)?,
            notifications: NotificationSettings::default(),
        })
    }

    pub fn set_birthday(&mut self, birthday: Option<Birthday>) {
        self.birthday = birthday;
    }

    pub fn has_birthday(&self) -> bool {
        self.birthday.is_some()
    }
}
