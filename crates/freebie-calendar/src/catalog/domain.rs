use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable catalog identifier, used as the join key for saved and claimed sets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub String);

impl OfferId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OfferId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OfferId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Drinks,
    Desserts,
    Beauty,
    Retail,
    Entertainment,
}

impl Category {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Food,
            Self::Drinks,
            Self::Desserts,
            Self::Beauty,
            Self::Retail,
            Self::Entertainment,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Drinks => "Drinks",
            Self::Desserts => "Desserts",
            Self::Beauty => "Beauty",
            Self::Retail => "Retail",
            Self::Entertainment => "Entertainment",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(&normalized))
    }
}

/// Breadth of the period around the birthday during which an offer is valid.
///
/// The derived ordering is the window priority used by the saved list:
/// `Day < Week < Month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionWindow {
    Day,
    Week,
    Month,
}

impl RedemptionWindow {
    pub const fn ordered() -> [Self; 3] {
        [Self::Day, Self::Week, Self::Month]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "Birthday only",
            Self::Week => "Birthday week",
            Self::Month => "Entire month",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|window| window.key() == normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

/// The reward itself, as advertised by the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferReward {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_range: Option<ValueRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub requires_app: bool,
    #[serde(default)]
    pub requires_email: bool,
    #[serde(default)]
    pub requires_id: bool,
    #[serde(default)]
    pub advance_signup_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<u8>,
}

impl Requirements {
    /// No app and no advance signup.
    pub const fn is_easy(&self) -> bool {
        !self.requires_app && self.advance_signup_days == 0
    }

    pub const fn needs_advance_signup(&self) -> bool {
        self.advance_signup_days > 0
    }
}

/// A single birthday promotion in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub name: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub types: Vec<String>,
    pub offer: OfferReward,
    #[serde(default)]
    pub requirements: Requirements,
    pub redemption_window: RedemptionWindow,
    #[serde(default)]
    pub has_multiple_locations: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::loader::deserialize_optional_verified_date"
    )]
    pub last_verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub popularity: u32,
}

fn default_active() -> bool {
    true
}

impl Offer {
    pub fn title(&self) -> &str {
        &self.offer.title
    }

    pub const fn is_easy(&self) -> bool {
        self.requirements.is_easy()
    }

    pub const fn advance_signup_days(&self) -> u32 {
        self.requirements.advance_signup_days
    }
}
