use crate::config::SiteConfig;
use crate::content::{ContentError, SiteContent, load_catalog};
use counsel_core::{ServiceCatalog, ShellEvent, ShellState, WizardEvent, WizardState};
use std::rc::Rc;
use yew::prelude::*;

/// Page shell state as a Yew reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShellModel(pub ShellState);

impl ShellModel {
    #[must_use]
    pub const fn opened(open: bool) -> Self {
        Self(ShellState { overlay_open: open })
    }

    #[must_use]
    pub const fn overlay_open(&self) -> bool {
        self.0.overlay_open
    }
}

impl Reducible for ShellModel {
    type Action = ShellEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.0.apply(action);
        if next == self.0 {
            self
        } else {
            Rc::new(Self(next))
        }
    }
}

/// Booking wizard state as a Yew reducer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardModel(pub WizardState);

impl Reducible for WizardModel {
    type Action = WizardEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.0.reduce(action);
        if next == self.0 {
            self
        } else {
            Rc::new(Self(next))
        }
    }
}

/// Everything the page renders that is fixed for the session.
#[derive(Debug, Clone)]
pub struct SiteData {
    pub catalog: Rc<ServiceCatalog>,
    pub content: Rc<SiteContent>,
    pub config: Rc<SiteConfig>,
}

impl SiteData {
    /// Parse the bundled catalog and content with `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if either data file is malformed.
    pub fn load(config: SiteConfig) -> Result<Self, ContentError> {
        Ok(Self {
            catalog: Rc::new(load_catalog()?),
            content: Rc::new(SiteContent::load_from_static()?),
            config: Rc::new(config),
        })
    }
}

impl PartialEq for SiteData {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog)
            && Rc::ptr_eq(&self.content, &other.content)
            && Rc::ptr_eq(&self.config, &other.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counsel_core::{ServiceId, WizardStep};

    #[test]
    fn shell_reducer_reuses_unchanged_state() {
        let closed = Rc::new(ShellModel::default());
        let same = Rc::clone(&closed).reduce(ShellEvent::CloseOverlay);
        assert!(Rc::ptr_eq(&closed, &same));
        let open = closed.reduce(ShellEvent::OpenOverlay);
        assert!(open.overlay_open());
    }

    #[test]
    fn wizard_reducer_applies_core_transitions() {
        let model = Rc::new(WizardModel::default());
        let paying = model.reduce(WizardEvent::ChooseService {
            service: ServiceId::new("life"),
        });
        assert_eq!(paying.0.step, WizardStep::Paying);
        let ignored = Rc::clone(&paying).reduce(WizardEvent::CompleteScheduling);
        assert!(Rc::ptr_eq(&paying, &ignored));
        let closed = paying.reduce(WizardEvent::Close);
        assert_eq!(closed.0, WizardState::default());
    }

    #[test]
    fn site_data_loads_bundled_files() {
        let data = SiteData::load(SiteConfig::default()).unwrap();
        assert_eq!(data.catalog.len(), 3);
        assert_eq!(data, data.clone());
    }
}
