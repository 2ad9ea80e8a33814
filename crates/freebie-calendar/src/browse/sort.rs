use super::criteria::SortKey;
use crate::catalog::Offer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Returns a new, stably ordered view; the input slice is left untouched.
pub fn sort_offers<'a>(offers: &[&'a Offer], key: SortKey) -> Vec<&'a Offer> {
    let mut sorted = offers.to_vec();

    match key {
        SortKey::Popularity => sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
        SortKey::Name => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Recent => sort_recent(&mut sorted),
        SortKey::Deadline => sorted.sort_by_key(|offer| offer.advance_signup_days()),
    }

    sorted
}

/// Case-insensitive name collation with a byte-wise tie break so the order
/// stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Newest verification first. An offer without a verification date compares
/// equal to everything, so it keeps its position and nothing moves across
/// it; only the dated runs between such offers are reordered.
fn sort_recent(offers: &mut [&Offer]) {
    let mut run_start = 0;

    for index in 0..=offers.len() {
        let at_boundary = offers
            .get(index)
            .map(|offer| offer.last_verified_at.is_none())
            .unwrap_or(true);

        if at_boundary {
            offers[run_start..index].sort_by(|a, b| b.last_verified_at.cmp(&a.last_verified_at));
            run_start = index + 1;
        }
    }
}

/// Orderings offered on the saved list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedSortKey {
    /// Window priority: day, then week, then month.
    #[default]
    Redemption,
    Name,
    Deadline,
}

impl SavedSortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "redemption" | "window" => Some(Self::Redemption),
            "name" => Some(Self::Name),
            "deadline" => Some(Self::Deadline),
            _ => None,
        }
    }
}

pub fn sort_saved<'a>(offers: &[&'a Offer], key: SavedSortKey) -> Vec<&'a Offer> {
    let mut sorted = offers.to_vec();

    match key {
        SavedSortKey::Redemption => sorted.sort_by_key(|offer| offer.redemption_window),
        SavedSortKey::Name => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SavedSortKey::Deadline => sorted.sort_by_key(|offer| offer.advance_signup_days()),
    }

    sorted
}
