pub mod gateway;
pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod tester;
pub mod walk;

use anyhow::{Context, Result};
use counsel_core::ServiceCatalog;

pub use seeds::resolve_seed_inputs;
pub use tester::*;

/// Data the scenarios run against; the same catalog the site ships.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub catalog: ServiceCatalog,
}

impl TesterAssets {
    /// # Errors
    ///
    /// Fails when the bundled catalog does not parse or validate.
    pub fn load_default() -> Result<Self> {
        let catalog = ServiceCatalog::bundled().context("parsing bundled services.json")?;
        Ok(Self { catalog })
    }
}
