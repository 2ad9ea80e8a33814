use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Leap year used when a birthday has to be shown as a concrete date.
pub const REFERENCE_YEAR: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BirthdayError {
    #[error("birthday month {0} is outside 1-12")]
    MonthOutOfRange(u32),
    #[error("birthday day {0} is outside 1-31")]
    DayOutOfRange(u32),
    #[error("'{0}' is not a birthday in MM-DD form")]
    Unparsable(String),
}

/// How a month/day that does not exist in the target year (Feb 29, Apr 31)
/// is turned into a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOverflowPolicy {
    /// Feb 29 becomes Feb 28.
    #[default]
    ClampToMonthEnd,
    /// Feb 29 becomes Mar 1.
    RollToNextMonth,
}

impl DayOverflowPolicy {
    pub(crate) fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" | "clamp_to_month_end" | "feb28" => Some(Self::ClampToMonthEnd),
            "roll" | "roll_to_next_month" | "mar1" => Some(Self::RollToNextMonth),
            _ => None,
        }
    }
}

/// A recurring annual date with no year component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBirthday")]
pub struct Birthday {
    month: u32,
    day: u32,
}

#[derive(Deserialize)]
struct RawBirthday {
    month: u32,
    day: u32,
}

impl TryFrom<RawBirthday> for Birthday {
    type Error = BirthdayError;

    fn try_from(raw: RawBirthday) -> Result<Self, Self::Error> {
        Birthday::new(raw.month, raw.day)
    }
}

impl Birthday {
    pub fn new(month: u32, day: u32) -> Result<Self, BirthdayError> {
        if !(1..=12).contains(&month) {
            return Err(BirthdayError::MonthOutOfRange(month));
        }
        if !(1..=31).contains(&day) {
            return Err(BirthdayError::DayOutOfRange(day));
        }
        Ok(Self { month, day })
    }

    /// Profiles store month and day in separate nullable columns; both must
    /// be present for the birthday to count as set.
    pub fn from_parts(month: Option<u32>, day: Option<u32>) -> Result<Option<Self>, BirthdayError> {
        match (month, day) {
            (Some(month), Some(day)) => Self::new(month, day).map(Some),
            _ => Ok(None),
        }
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub const fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// The concrete date of this birthday in `year`.
    pub fn in_year(&self, year: i32, policy: DayOverflowPolicy) -> NaiveDate {
        if let Some(date) = NaiveDate::from_ymd_opt(year, self.month, self.day) {
            return date;
        }

        let first_of_next = first_of_following_month(year, self.month);
        match policy {
            DayOverflowPolicy::ClampToMonthEnd => first_of_next - Duration::days(1),
            DayOverflowPolicy::RollToNextMonth => first_of_next,
        }
    }

    /// The next occurrence on or after `today`.
    pub fn next_occurrence(&self, today: NaiveDate, policy: DayOverflowPolicy) -> NaiveDate {
        let this_year = self.in_year(today.year(), policy);
        if this_year < today {
            self.in_year(today.year() + 1, policy)
        } else {
            this_year
        }
    }

    /// Whole days until the next occurrence; 0 on the birthday itself.
    pub fn days_until(&self, today: NaiveDate, policy: DayOverflowPolicy) -> i64 {
        (self.next_occurrence(today, policy) - today).num_days()
    }

    pub fn to_reference_date(&self) -> NaiveDate {
        self.in_year(REFERENCE_YEAR, DayOverflowPolicy::ClampToMonthEnd)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

fn first_of_following_month(year: i32, month: u32) -> NaiveDate {
    let (year, month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = MONTHS[(self.month - 1) as usize];
        write!(f, "{} {}", month, self.day)
    }
}

impl FromStr for Birthday {
    type Err = BirthdayError;

    /// Accepts `MM-DD` or `MM/DD`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (month, day) = trimmed
            .split_once(['-', '/'])
            .ok_or_else(|| BirthdayError::Unparsable(raw.to_string()))?;
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| BirthdayError::Unparsable(raw.to_string()))?;
        let day = day
            .trim()
            .parse::<u32>()
            .map_err(|_| BirthdayError::Unparsable(raw.to_string()))?;
        Self::new(month, day)
    }
}

/// `None` when no birthday is set.
pub fn days_until_birthday(
    birthday: Option<&Birthday>,
    today: NaiveDate,
    policy: DayOverflowPolicy,
) -> Option<i64> {
    birthday.map(|birthday| birthday.days_until(today, policy))
}

pub fn format_birthday(birthday: Option<&Birthday>) -> String {
    match birthday {
        Some(birthday) => birthday.to_string(),
        None => "Not set".to_string(),
    }
}

/// Date-picker representation; unset birthdays map to January 1.
pub fn birthday_to_date(birthday: Option<&Birthday>) -> NaiveDate {
    match birthday {
        Some(birthday) => birthday.to_reference_date(),
        None => NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
    }
}

pub fn date_to_birthday(date: NaiveDate) -> Birthday {
    Birthday::from_date(date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    Today,
    ThisWeek,
    ComingUp,
    Later,
}

impl CountdownPhase {
    pub const fn from_days(days_until: i64) -> Self {
        if days_until <= 0 {
            Self::Today
        } else if days_until <= 7 {
            Self::ThisWeek
        } else if days_until <= 30 {
            Self::ComingUp
        } else {
            Self::Later
        }
    }

    pub fn message(self, birthday: &Birthday) -> String {
        match self {
            Self::Today => "It's your birthday today!".to_string(),
            Self::ThisWeek => "Your birthday is this week!".to_string(),
            Self::ComingUp => "Your birthday is coming up!".to_string(),
            Self::Later => format!("Your birthday is on {birthday}"),
        }
    }
}
