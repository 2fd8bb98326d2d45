//! Static service catalog offered for booking.
use crate::price::Price;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Unique key of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Artwork shown on service cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceIcon {
    #[default]
    Education,
    Heart,
    Compass,
}

/// A bookable counselling service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub price: Price,
    pub duration: String,
    pub description: String,
    /// Heading on the landing page grid when it differs from the booking title
    #[serde(default)]
    pub headline: Option<String>,
    /// Longer copy used on the landing page services grid
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub icon: ServiceIcon,
}

impl Service {
    #[must_use]
    pub fn grid_title(&self) -> &str {
        self.headline.as_deref().unwrap_or(&self.title)
    }

    /// Line shown to the payment provider for this service.
    #[must_use]
    pub fn checkout_description(&self) -> String {
        format!("{} ({})", self.title, self.duration)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no services")]
    Empty,
    #[error("service id '{0}' appears more than once")]
    DuplicateId(ServiceId),
    #[error("service '{0}' has an empty title")]
    MissingTitle(ServiceId),
}

/// The ordered list of services, validated at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

/// The catalog the site ships, embedded at compile time.
pub const BUNDLED_SERVICES_JSON: &str = include_str!("../data/services.json");

impl ServiceCatalog {
    /// Build a catalog from already-constructed services.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, an id repeats, or a title is blank.
    pub fn new(services: Vec<Service>) -> Result<Self, CatalogError> {
        if services.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = BTreeSet::new();
        for service in &services {
            if !seen.insert(service.id.clone()) {
                return Err(CatalogError::DuplicateId(service.id.clone()));
            }
            if service.title.trim().is_empty() {
                return Err(CatalogError::MissingTitle(service.id.clone()));
            }
        }
        Ok(Self { services })
    }

    /// Parse the catalog data file (`{"services": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a price does not parse,
    /// or the catalog fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Self = serde_json::from_str(json)?;
        Self::new(raw.services)
    }

    /// Parse [`BUNDLED_SERVICES_JSON`].
    ///
    /// # Errors
    ///
    /// Same as [`ServiceCatalog::from_json`].
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_SERVICES_JSON)
    }

    #[must_use]
    pub fn get(&self, id: &ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| &service.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
