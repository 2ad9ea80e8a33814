use chrono::NaiveDate;
use freebie_calendar::birthday::{Birthday, DayOverflowPolicy};
use freebie_calendar::browse::{SavedSortKey, SortKey};
use freebie_calendar::catalog::{Catalog, Category, RedemptionWindow};
use freebie_calendar::clock::Clock;
use freebie_calendar::config::CatalogConfig;
use freebie_calendar::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) day_overflow: DayOverflowPolicy,
    pub(crate) clock: Arc<dyn Clock>,
}

/// `override_path` (a CLI flag) wins over the configured path; with neither,
/// the bundled catalog is used.
pub(crate) fn load_catalog(
    config: &CatalogConfig,
    override_path: Option<&Path>,
) -> Result<Catalog, AppError> {
    let catalog = match override_path.or(config.path.as_deref()) {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::bundled()?,
    };
    Ok(catalog)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_birthday(raw: &str) -> Result<Birthday, String> {
    raw.parse::<Birthday>().map_err(|err| err.to_string())
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Category::ordered()
            .into_iter()
            .map(Category::label)
            .collect();
        format!("unknown category '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn parse_window(raw: &str) -> Result<RedemptionWindow, String> {
    RedemptionWindow::parse(raw)
        .ok_or_else(|| format!("unknown redemption window '{raw}' (expected day, week or month)"))
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortKey, String> {
    SortKey::parse(raw).ok_or_else(|| {
        format!("unknown sort '{raw}' (expected popularity, name, recent or deadline)")
    })
}

pub(crate) fn parse_saved_sort(raw: &str) -> Result<SavedSortKey, String> {
    SavedSortKey::parse(raw)
        .ok_or_else(|| format!("unknown saved sort '{raw}' (expected redemption, name or deadline)"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
