use crate::catalog::Offer;
use serde::Serialize;

/// A signup deadline this many days out or fewer is urgent.
pub const URGENT_WITHIN_DAYS: i64 = 7;
/// Upper bound of the "sign up soon" bucket.
pub const SIGNUP_SOON_WITHIN_DAYS: i64 = 30;

/// Saved offer with its advance-signup cutoff relative to today. Negative
/// deadlines mean the cutoff has already passed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeadlineAnnotated<'a> {
    pub offer: &'a Offer,
    pub signup_deadline_days: i64,
    pub is_urgent: bool,
}

impl<'a> DeadlineAnnotated<'a> {
    pub fn new(offer: &'a Offer, days_until_birthday: i64) -> Self {
        let signup_deadline_days = days_until_birthday - i64::from(offer.advance_signup_days());
        Self {
            offer,
            signup_deadline_days,
            is_urgent: signup_deadline_days <= URGENT_WITHIN_DAYS,
        }
    }

    pub fn bucket(&self) -> DeadlineBucket {
        DeadlineBucket::classify(self.signup_deadline_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineBucket {
    /// Cutoff is today or already passed.
    SignupNow,
    SignupSoon,
    /// Far enough out that no action is needed yet.
    Tracked,
}

impl DeadlineBucket {
    pub const fn classify(signup_deadline_days: i64) -> Self {
        if signup_deadline_days <= 0 {
            Self::SignupNow
        } else if signup_deadline_days <= SIGNUP_SOON_WITHIN_DAYS {
            Self::SignupSoon
        } else {
            Self::Tracked
        }
    }
}

/// Annotates the offers that need advance signup and orders them by
/// deadline, most pressing first. Ties keep their input order.
pub fn annotate<'a>(offers: &[&'a Offer], days_until_birthday: i64) -> Vec<DeadlineAnnotated<'a>> {
    let mut annotated: Vec<DeadlineAnnotated<'a>> = offers
        .iter()
        .copied()
        .filter(|offer| offer.requirements.needs_advance_signup())
        .map(|offer| DeadlineAnnotated::new(offer, days_until_birthday))
        .collect();
    annotated.sort_by_key(|entry| entry.signup_deadline_days);
    annotated
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeadlineBuckets<'a> {
    pub signup_now: Vec<DeadlineAnnotated<'a>>,
    pub signup_soon: Vec<DeadlineAnnotated<'a>>,
    pub tracked: Vec<DeadlineAnnotated<'a>>,
}

impl<'a> DeadlineBuckets<'a> {
    /// Splits an already sorted annotation list; order within each bucket is
    /// preserved.
    pub fn split(annotated: Vec<DeadlineAnnotated<'a>>) -> Self {
        let mut buckets = Self::default();
        for entry in annotated {
            match entry.bucket() {
                DeadlineBucket::SignupNow => buckets.signup_now.push(entry),
                DeadlineBucket::SignupSoon => buckets.signup_soon.push(entry),
                DeadlineBucket::Tracked => buckets.tracked.push(entry),
            }
        }
        buckets
    }

    pub fn action_count(&self) -> usize {
        self.signup_now.len() + self.signup_soon.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, OfferId, OfferReward, RedemptionWindow, Requirements};

    fn offer(id: &str, advance_signup_days: u32) -> Offer {
        Offer {
            id: OfferId::new(id),
            name: id.to_string(),
            description: String::new(),
            category: Category::Food,
            types: Vec::new(),
            offer: OfferReward {
                title: "Free entree".to_string(),
                description: None,
                value_range: None,
            },
            requirements: Requirements {
                advance_signup_days,
                ..Requirements::default()
            },
            redemption_window: RedemptionWindow::Day,
            has_multiple_locations: false,
            instructions: Vec::new(),
            restrictions: Vec::new(),
            is_active: true,
            verified: false,
            last_verified_at: None,
            popularity: 0,
        }
    }

    #[test]
    fn urgent_boundary_is_inclusive() {
        let three = offer("three", 3);
        let two = offer("two", 2);

        let at_boundary = DeadlineAnnotated::new(&three, 10);
        assert_eq!(at_boundary.signup_deadline_days, 7);
        assert!(at_boundary.is_urgent);

        let past_boundary = DeadlineAnnotated::new(&two, 10);
        assert_eq!(past_boundary.signup_deadline_days, 8);
        assert!(!past_boundary.is_urgent);
    }

    #[test]
    fn overdue_lands_in_signup_now() {
        let late = offer("late", 10);
        let buckets = DeadlineBuckets::split(annotate(&[&late], 5));

        assert_eq!(buckets.signup_now.len(), 1);
        assert_eq!(buckets.signup_now[0].signup_deadline_days, -5);
        assert!(buckets.signup_soon.is_empty());
    }

    #[test]
    fn offers_without_signup_are_not_annotated() {
        let walk_in = offer("walk-in", 0);
        let signup = offer("signup", 7);
        let annotated = annotate(&[&walk_in, &signup], 20);

        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].offer.id.as_str(), "signup");
    }

    #[test]
    fn annotations_sort_ascending_and_bucket_by_range() {
        let a = offer("a", 1);
        let b = offer("b", 40);
        let c = offer("c", 20);
        let annotated = annotate(&[&a, &b, &c], 45);

        let days: Vec<i64> = annotated.iter().map(|e| e.signup_deadline_days).collect();
        assert_eq!(days, vec![5, 25, 44]);

        let buckets = DeadlineBuckets::split(annotated);
        assert!(buckets.signup_now.is_empty());
        assert_eq!(buckets.signup_soon.len(), 2);
        assert_eq!(buckets.tracked.len(), 1);
        assert_eq!(buckets.action_count(), 2);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(DeadlineBucket::classify(0), DeadlineBucket::SignupNow);
        assert_eq!(DeadlineBucket::classify(1), DeadlineBucket::SignupSoon);
        assert_eq!(DeadlineBucket::classify(30), DeadlineBucket::SignupSoon);
        assert_eq!(DeadlineBucket::classify(31), DeadlineBucket::Tracked);
    }
}
