use crate::catalog::OfferId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

/// Offers the user bookmarked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedFreebies {
    ids: BTreeSet<OfferId>,
}

impl SavedFreebies {
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OfferId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `false` when the offer was already saved.
    pub fn save(&mut self, id: OfferId) -> bool {
        self.ids.insert(id)
    }

    pub fn unsave(&mut self, id: &OfferId) -> bool {
        self.ids.remove(id)
    }

    /// Returns whether the offer is saved afterwards.
    pub fn toggle(&mut self, id: OfferId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_saved(&self, id: &OfferId) -> bool {
        self.ids.contains(id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &OfferId> {
        self.ids.iter()
    }
}

/// A claim is scoped to one calendar year so the same offer can be claimed
/// again next birthday.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimKey {
    pub offer_id: OfferId,
    pub year: i32,
}

impl ClaimKey {
    pub fn new(offer_id: OfferId, year: i32) -> Self {
        Self { offer_id, year }
    }

    /// Parses the persisted `"{id}_{year}"` form. Ids may contain
    /// underscores; the year is whatever follows the last one.
    pub fn parse(raw: &str) -> Option<Self> {
        let (id, year) = raw.trim().rsplit_once('_')?;
        if id.is_empty() {
            return None;
        }
        let year = year.parse::<i32>().ok()?;
        Some(Self::new(OfferId::new(id), year))
    }
}

impl fmt::Display for ClaimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.offer_id, self.year)
    }
}

impl Serialize for ClaimKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClaimKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClaimKey::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("'{raw}' is not an id_year claim key")))
    }
}

/// Offers marked as redeemed, per year. Entries from earlier years are kept
/// but never count as claimed for the current year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimedFreebies {
    keys: BTreeSet<ClaimKey>,
}

impl ClaimedFreebies {
    /// Builds the set from persisted keys, dropping any that do not parse.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = BTreeSet::new();
        for raw in keys {
            let raw = raw.as_ref();
            match ClaimKey::parse(raw) {
                Some(key) => {
                    parsed.insert(key);
                }
                None => warn!(key = raw, "dropping malformed claim key"),
            }
        }
        Self { keys: parsed }
    }

    pub fn claim(&mut self, offer_id: OfferId, year: i32) -> bool {
        self.keys.insert(ClaimKey::new(offer_id, year))
    }

    pub fn unclaim(&mut self, offer_id: &OfferId, year: i32) -> bool {
        self.keys.remove(&ClaimKey::new(offer_id.clone(), year))
    }

    /// Returns whether the offer is claimed for `year` afterwards.
    pub fn toggle(&mut self, offer_id: OfferId, year: i32) -> bool {
        let key = ClaimKey::new(offer_id, year);
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn is_claimed(&self, offer_id: &OfferId, year: i32) -> bool {
        self.keys.contains(&ClaimKey::new(offer_id.clone(), year))
    }

    pub fn claimed_in(&self, year: i32) -> impl Iterator<Item = &OfferId> {
        self.keys
            .iter()
            .filter(move |key| key.year == year)
            .map(|key| &key.offer_id)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.keys.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &ClaimKey> {
        self.keys.iter()
    }
}
