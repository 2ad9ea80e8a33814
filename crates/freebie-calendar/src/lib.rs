//! Birthday freebie catalog: filtering, sorting, and the deadline math
//! behind the birthday calendar.

pub mod birthday;
pub mod browse;
pub mod calendar;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod membership;
pub mod profile;
pub mod telemetry;

pub use birthday::{Birthday, BirthdayError, CountdownPhase, DayOverflowPolicy};
pub use catalog::{Catalog, CatalogError, Offer, OfferId};
pub use error::AppError;
