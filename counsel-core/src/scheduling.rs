//! Inline scheduling widget configuration.
use crate::catalog::Service;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_SCHEDULING_URL: &str =
    "https://calendly.com/dpathak0108/counselling-sessions-with-dinesh-pathak";

/// Answer slot the widget uses for the booked service.
const SERVICE_ANSWER: &str = "a1";
const SERVICE_FALLBACK: &str = "Not specified";

/// Colours and detail toggles applied to the embedded page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    /// Hex colours without the leading `#`.
    pub background_color: String,
    pub primary_color: String,
    pub text_color: String,
    pub hide_event_type_details: bool,
    pub hide_landing_page_details: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            background_color: "ffffff".to_string(),
            primary_color: "10b981".to_string(),
            text_color: "1f2937".to_string(),
            hide_event_type_details: false,
            hide_landing_page_details: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignTags {
    pub campaign: String,
    pub source: String,
    pub medium: String,
}

impl Default for CampaignTags {
    fn default() -> Self {
        Self {
            campaign: "counselling_booking".to_string(),
            source: "website".to_string(),
            medium: "modal".to_string(),
        }
    }
}

/// Read-only description of the scheduling iframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingEmbed {
    pub url: String,
    /// Host of the embedding page, reported to the widget when known.
    pub embed_domain: Option<String>,
    pub prefill_answers: BTreeMap<String, String>,
    pub campaign: CampaignTags,
    pub page_settings: PageSettings,
}

impl SchedulingEmbed {
    /// Embed for the booked service; a missing service is prefilled as "Not specified".
    #[must_use]
    pub fn for_service(url: &str, service: Option<&Service>) -> Self {
        let title = service.map_or(SERVICE_FALLBACK, |s| s.title.as_str());
        let mut prefill_answers = BTreeMap::new();
        prefill_answers.insert(SERVICE_ANSWER.to_string(), title.to_string());
        Self {
            url: url.to_string(),
            embed_domain: None,
            prefill_answers,
            campaign: CampaignTags::default(),
            page_settings: PageSettings::default(),
        }
    }

    #[must_use]
    pub fn with_embed_domain(mut self, domain: impl Into<String>) -> Self {
        self.embed_domain = Some(domain.into());
        self
    }

    /// Full iframe URL with every query value percent-encoded.
    #[must_use]
    pub fn embed_url(&self) -> String {
        let settings = &self.page_settings;
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(domain) = &self.embed_domain {
            params.push(("embed_domain", domain.clone()));
        }
        params.push(("embed_type", "Inline".to_string()));
        params.push((
            "hide_event_type_details",
            flag(settings.hide_event_type_details),
        ));
        params.push((
            "hide_landing_page_details",
            flag(settings.hide_landing_page_details),
        ));
        params.push(("background_color", settings.background_color.clone()));
        params.push(("primary_color", settings.primary_color.clone()));
        params.push(("text_color", settings.text_color.clone()));
        for (key, value) in &self.prefill_answers {
            params.push((key.as_str(), value.clone()));
        }
        params.push(("utm_campaign", self.campaign.campaign.clone()));
        params.push(("utm_source", self.campaign.source.clone()));
        params.push(("utm_medium", self.campaign.medium.clone()));

        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{query}", self.url)
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ServiceIcon, ServiceId};
    use crate::price::Price;

    fn marriage() -> Service {
        Service {
            id: ServiceId::new("marriage"),
            title: "Marriage & Relationship Guidance".to_string(),
            price: Price::parse("₹1499").unwrap(),
            duration: "45 minutes".to_string(),
            description: String::new(),
            headline: None,
            overview: String::new(),
            audience: Vec::new(),
            includes: Vec::new(),
            icon: ServiceIcon::Heart,
        }
    }

    #[test]
    fn prefills_service_title_encoded() {
        let service = marriage();
        let embed = SchedulingEmbed::for_service(DEFAULT_SCHEDULING_URL, Some(&service));
        let url = embed.embed_url();
        assert!(url.starts_with(DEFAULT_SCHEDULING_URL));
        assert!(url.contains("a1=Marriage%20%26%20Relationship%20Guidance"));
        assert!(url.contains("embed_type=Inline"));
        assert!(url.contains("primary_color=10b981"));
        assert!(url.contains("utm_campaign=counselling_booking"));
        assert!(url.contains("utm_source=website"));
        assert!(url.contains("utm_medium=modal"));
        assert!(url.contains("hide_event_type_details=0"));
    }

    #[test]
    fn missing_service_is_not_specified() {
        let embed = SchedulingEmbed::for_service(DEFAULT_SCHEDULING_URL, None);
        assert_eq!(
            embed.prefill_answers.get(SERVICE_ANSWER).map(String::as_str),
            Some("Not specified")
        );
        assert!(embed.embed_url().contains("a1=Not%20specified"));
    }

    #[test]
    fn appends_to_existing_query_and_reports_domain() {
        let embed = SchedulingEmbed::for_service("https://example.test/x?month=2025-01", None)
            .with_embed_domain("localhost:8080");
        let url = embed.embed_url();
        assert!(url.starts_with("https://example.test/x?month=2025-01&embed_domain=localhost%3A8080"));
    }
}
