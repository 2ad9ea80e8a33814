use super::domain::{
    Category, Offer, OfferId, OfferReward, RedemptionWindow, Requirements, ValueRange,
};
use super::CatalogError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<Offer>, CatalogError> {
    let offers: Vec<Offer> = serde_json::from_reader(reader)?;
    Ok(offers)
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Offer>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut offers = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        offers.push(row.into_offer(index + 2)?);
    }

    Ok(offers)
}

/// Flat export shape used by spreadsheet-maintained catalogs.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    category: String,
    #[serde(default)]
    types: String,
    offer_title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    offer_description: Option<String>,
    #[serde(default)]
    value_min: Option<f32>,
    #[serde(default)]
    value_max: Option<f32>,
    #[serde(default)]
    requires_app: bool,
    #[serde(default)]
    requires_email: bool,
    #[serde(default)]
    requires_id: bool,
    #[serde(default)]
    advance_signup_days: u32,
    redemption_window: String,
    #[serde(default)]
    popularity: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_verified_at: Option<String>,
}

impl CatalogRow {
    fn into_offer(self, line: usize) -> Result<Offer, CatalogError> {
        let category = Category::parse(&self.category).ok_or_else(|| CatalogError::InvalidRow {
            line,
            reason: format!("unknown category '{}'", self.category),
        })?;
        let redemption_window = RedemptionWindow::parse(&self.redemption_window).ok_or_else(|| {
            CatalogError::InvalidRow {
                line,
                reason: format!("unknown redemption window '{}'", self.redemption_window),
            }
        })?;
        let last_verified_at = match self.last_verified_at.as_deref() {
            Some(raw) => Some(parse_verified_date(raw).ok_or_else(|| CatalogError::InvalidRow {
                line,
                reason: format!("unparsable verification date '{raw}'"),
            })?),
            None => None,
        };
        let value_range = match (self.value_min, self.value_max) {
            (Some(min), Some(max)) => Some(ValueRange { min, max }),
            (None, None) => None,
            _ => {
                return Err(CatalogError::InvalidRow {
                    line,
                    reason: "value_min and value_max must be set together".to_string(),
                })
            }
        };
        let types = self
            .types
            .split('|')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Offer {
            id: OfferId(self.id),
            name: self.name,
            description: self.description,
            category,
            types,
            offer: OfferReward {
                title: self.offer_title,
                description: self.offer_description,
                value_range,
            },
            requirements: Requirements {
                requires_app: self.requires_app,
                requires_email: self.requires_email,
                requires_id: self.requires_id,
                advance_signup_days: self.advance_signup_days,
                age_restriction: None,
            },
            redemption_window,
            has_multiple_locations: false,
            instructions: Vec::new(),
            restrictions: Vec::new(),
            is_active: true,
            verified: last_verified_at.is_some(),
            last_verified_at,
            popularity: self.popularity,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn deserialize_optional_verified_date<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = empty_string_as_none(deserializer)?;
    opt.map(|raw| {
        parse_verified_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unparsable date '{raw}'")))
    })
    .transpose()
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates. A bare date is
/// read as midnight UTC.
pub(crate) fn parse_verified_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
