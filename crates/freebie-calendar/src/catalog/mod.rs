pub mod domain;
pub(crate) mod loader;

pub use domain::{
    Category, Offer, OfferId, OfferReward, RedemptionWindow, Requirements, ValueRange,
};

use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::info;

const BUNDLED_CATALOG: &str = include_str!("../../data/freebies.json");

/// Reasons a catalog is rejected at load time.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("offer at position {position} has an empty id")]
    MissingId { position: usize },
    #[error("offer id '{0}' appears more than once")]
    DuplicateId(OfferId),
    #[error("offer '{0}' has a value range whose minimum exceeds its maximum")]
    InvalidValueRange(OfferId),
}

/// Immutable, ordered collection of offers. Loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct Catalog {
    offers: Vec<Offer>,
}

impl Catalog {
    pub fn new(offers: Vec<Offer>) -> Result<Self, CatalogError> {
        validate(&offers)?;
        Ok(Self { offers })
    }

    /// The sample dataset shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_reader(Cursor::new(BUNDLED_CATALOG))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let catalog = if is_csv {
            Self::from_csv_reader(file)?
        } else {
            Self::from_json_reader(file)?
        };
        info!(path = %path.display(), offers = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(loader::parse_json(reader)?)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(loader::parse_csv(reader)?)
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter()
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn get(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.iter().find(|offer| &offer.id == id)
    }

    pub fn by_type(&self, tag: &str) -> Vec<&Offer> {
        self.offers
            .iter()
            .filter(|offer| offer.types.iter().any(|t| t == tag))
            .collect()
    }

    /// Per-category offer counts in display order, skipping empty categories.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ordered()
            .into_iter()
            .map(|category| {
                let count = self
                    .offers
                    .iter()
                    .filter(|offer| offer.category == category)
                    .count();
                (category, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

fn validate(offers: &[Offer]) -> Result<(), CatalogError> {
    let mut seen: HashSet<&OfferId> = HashSet::with_capacity(offers.len());

    for (position, offer) in offers.iter().enumerate() {
        if offer.id.as_str().trim().is_empty() {
            return Err(CatalogError::MissingId { position });
        }
        if !seen.insert(&offer.id) {
            return Err(CatalogError::DuplicateId(offer.id.clone()));
        }
        if let Some(range) = offer.offer.value_range {
            if range.min > range.max {
                return Err(CatalogError::InvalidValueRange(offer.id.clone()));
            }
        }
    }

    Ok(())
}
