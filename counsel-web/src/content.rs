//! Static page content bundled into the wasm binary.
use counsel_core::{CatalogError, ServiceCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONTENT_JSON: &str = include_str!("../static/assets/data/content.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content data is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Youtube,
    Instagram,
    Facebook,
    X,
}

impl SocialNetwork {
    /// Translation key of the accessible label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Youtube => "footer.social.youtube",
            Self::Instagram => "footer.social.instagram",
            Self::Facebook => "footer.social.facebook",
            Self::X => "footer.social.x",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub network: SocialNetwork,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default)]
    pub link: String,
    pub image: String,
}

impl Book {
    /// Store link, if the book is on sale online.
    #[must_use]
    pub fn purchase_link(&self) -> Option<&str> {
        Some(self.link.trim()).filter(|link| !link.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEmbed {
    pub id: String,
    pub title: String,
}

impl VideoEmbed {
    #[must_use]
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub contact_email: String,
    pub portrait: String,
    pub video: VideoEmbed,
    pub books: Vec<Book>,
    pub socials: Vec<SocialLink>,
}

impl SiteContent {
    /// Parse the bundled content file.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON does not match the expected shape.
    pub fn load_from_static() -> Result<Self, ContentError> {
        Self::from_json(CONTENT_JSON)
    }

    /// # Errors
    ///
    /// Returns an error if `json` does not match the expected shape.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn support_mailto(&self) -> String {
        format!("mailto:{}", self.contact_email)
    }
}

/// Parse the bundled service catalog.
///
/// # Errors
///
/// Returns an error if the catalog fails to parse or validate.
pub fn load_catalog() -> Result<ServiceCatalog, ContentError> {
    Ok(ServiceCatalog::bundled()?)
}

/// Calendar year shown in the copyright line.
#[must_use]
pub fn current_year() -> i32 {
    #[cfg(target_arch = "wasm32")]
    {
        i32::try_from(js_sys::Date::new_0().get_full_year()).unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use chrono::Datelike;
        chrono::Local::now().year()
    }
}
