//! Deadline math and the calendar screen composer.

mod claimable;
mod deadline;
mod view;

pub use claimable::{claimable_today, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS};
pub use deadline::{
    annotate, DeadlineAnnotated, DeadlineBucket, DeadlineBuckets, SIGNUP_SOON_WITHIN_DAYS,
    URGENT_WITHIN_DAYS,
};
pub use view::{CalendarView, SavedView, WindowGroup};
