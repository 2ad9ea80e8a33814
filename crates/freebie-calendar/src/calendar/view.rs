use super::claimable::claimable_today;
use super::deadline::{annotate, DeadlineAnnotated, DeadlineBuckets};
use crate::birthday::{Birthday, CountdownPhase, DayOverflowPolicy};
use crate::browse::{sort_saved, SavedSortKey};
use crate::catalog::{Catalog, Offer, RedemptionWindow};
use crate::membership::{ClaimedFreebies, SavedFreebies};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// Saved offers sharing one redemption window, with this year's claim
/// progress.
#[derive(Debug, Clone, Serialize)]
pub struct WindowGroup<'a> {
    pub window: RedemptionWindow,
    pub label: &'static str,
    pub offers: Vec<&'a Offer>,
    pub claimed: usize,
    pub total: usize,
    pub all_claimed: bool,
}

impl<'a> WindowGroup<'a> {
    fn collect(
        window: RedemptionWindow,
        offers: &[&'a Offer],
        claimed: &ClaimedFreebies,
        year: i32,
    ) -> Self {
        let offers: Vec<&'a Offer> = offers
            .iter()
            .copied()
            .filter(|offer| offer.redemption_window == window)
            .collect();
        let claimed_count = offers
            .iter()
            .filter(|offer| claimed.is_claimed(&offer.id, year))
            .count();

        Self {
            window,
            label: window.label(),
            total: offers.len(),
            claimed: claimed_count,
            all_claimed: !offers.is_empty() && claimed_count == offers.len(),
            offers,
        }
    }

    /// One group per window in day, week, month order. Empty groups are kept.
    fn partition(offers: &[&'a Offer], claimed: &ClaimedFreebies, year: i32) -> Vec<Self> {
        RedemptionWindow::ordered()
            .into_iter()
            .map(|window| Self::collect(window, offers, claimed, year))
            .collect()
    }
}

fn saved_in_catalog_order<'a>(catalog: &'a Catalog, saved: &SavedFreebies) -> Vec<&'a Offer> {
    catalog
        .iter()
        .filter(|offer| saved.is_saved(&offer.id))
        .collect()
}

/// Everything the birthday calendar screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView<'a> {
    pub birthday: Birthday,
    pub birthday_label: String,
    pub today: NaiveDate,
    pub next_birthday: NaiveDate,
    pub days_until_birthday: i64,
    pub countdown: CountdownPhase,
    pub countdown_message: String,
    pub groups: Vec<WindowGroup<'a>>,
    pub signup_now: Vec<DeadlineAnnotated<'a>>,
    pub signup_soon: Vec<DeadlineAnnotated<'a>>,
    pub tracked: Vec<DeadlineAnnotated<'a>>,
    pub claimable_today: Vec<&'a Offer>,
}

impl<'a> CalendarView<'a> {
    /// Returns `None` when no birthday is set; nothing here is meaningful
    /// without one.
    pub fn compose(
        catalog: &'a Catalog,
        saved: &SavedFreebies,
        claimed: &ClaimedFreebies,
        birthday: Option<&Birthday>,
        today: NaiveDate,
        policy: DayOverflowPolicy,
    ) -> Option<Self> {
        let birthday = *birthday?;
        let days_until_birthday = birthday.days_until(today, policy);
        let saved_offers = saved_in_catalog_order(catalog, saved);

        let DeadlineBuckets {
            signup_now,
            signup_soon,
            tracked,
        } = DeadlineBuckets::split(annotate(&saved_offers, days_until_birthday));
        let countdown = CountdownPhase::from_days(days_until_birthday);

        debug!(
            days_until_birthday,
            saved = saved_offers.len(),
            signup_now = signup_now.len(),
            signup_soon = signup_soon.len(),
            "composed calendar view"
        );

        Some(Self {
            birthday_label: birthday.to_string(),
            next_birthday: birthday.next_occurrence(today, policy),
            countdown_message: countdown.message(&birthday),
            groups: WindowGroup::partition(&saved_offers, claimed, today.year()),
            claimable_today: claimable_today(&saved_offers, days_until_birthday),
            birthday,
            today,
            days_until_birthday,
            countdown,
            signup_now,
            signup_soon,
            tracked,
        })
    }

    pub fn group(&self, window: RedemptionWindow) -> Option<&WindowGroup<'a>> {
        self.groups.iter().find(|group| group.window == window)
    }

    pub fn has_action_items(&self) -> bool {
        !self.signup_now.is_empty() || !self.signup_soon.is_empty()
    }
}

/// The saved list, ordered by the user's chosen key and grouped by window.
#[derive(Debug, Clone, Serialize)]
pub struct SavedView<'a> {
    pub sort_by: SavedSortKey,
    pub offers: Vec<&'a Offer>,
    pub groups: Vec<WindowGroup<'a>>,
    pub count: usize,
}

impl<'a> SavedView<'a> {
    pub fn compose(
        catalog: &'a Catalog,
        saved: &SavedFreebies,
        claimed: &ClaimedFreebies,
        sort_by: SavedSortKey,
        year: i32,
    ) -> Self {
        let offers = sort_saved(&saved_in_catalog_order(catalog, saved), sort_by);

        Self {
            groups: WindowGroup::partition(&offers, claimed, year),
            count: offers.len(),
            sort_by,
            offers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OfferId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn no_birthday_means_no_calendar() {
        let catalog = Catalog::bundled().expect("bundled catalog");
        let view = CalendarView::compose(
            &catalog,
            &SavedFreebies::default(),
            &ClaimedFreebies::default(),
            None,
            date(2026, 3, 1),
            DayOverflowPolicy::default(),
        );
        assert!(view.is_none());
    }

    #[test]
    fn empty_saved_set_yields_empty_groups() {
        let catalog = Catalog::bundled().expect("bundled catalog");
        let birthday = Birthday::new(3, 5).expect("valid");
        let view = CalendarView::compose(
            &catalog,
            &SavedFreebies::default(),
            &ClaimedFreebies::default(),
            Some(&birthday),
            date(2026, 3, 1),
            DayOverflowPolicy::default(),
        )
        .expect("birthday set");

        assert_eq!(view.days_until_birthday, 4);
        assert_eq!(view.countdown, CountdownPhase::ThisWeek);
        assert_eq!(view.groups.len(), 3);
        assert!(view.groups.iter().all(|group| group.total == 0 && !group.all_claimed));
        assert!(view.claimable_today.is_empty());
        assert!(!view.has_action_items());
    }

    #[test]
    fn group_progress_counts_this_years_claims_only() {
        let catalog = Catalog::bundled().expect("bundled catalog");
        let saved = SavedFreebies::from_ids(["jersey-mikes-birthday", "cineplex-birthday"]);
        let mut claimed = ClaimedFreebies::default();
        claimed.claim(OfferId::from("jersey-mikes-birthday"), 2026);
        claimed.claim(OfferId::from("cineplex-birthday"), 2025);

        let view = SavedView::compose(&catalog, &saved, &claimed, SavedSortKey::Name, 2026);
        let week = view
            .groups
            .iter()
            .find(|group| group.window == RedemptionWindow::Week)
            .expect("week group");

        assert_eq!(view.count, 2);
        assert_eq!(week.total, 2);
        assert_eq!(week.claimed, 1);
        assert!(!week.all_claimed);
    }
}
