//! Build-time site configuration.
//!
//! Values are read with `option_env!` when the wasm bundle is compiled:
//! `RAZORPAY_KEY_ID`, `COUNSEL_ORDER_ENDPOINT`, `CALENDLY_URL` and `COUNSEL_LOG`.
//! The order endpoint defaults to `/api/create-order`; `off` disables it.
use counsel_core::{DEFAULT_SCHEDULING_URL, PaymentConfig};
use log::LevelFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub payment: PaymentConfig,
    pub scheduling_url: String,
    pub log_level: LevelFilter,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            payment: PaymentConfig::default(),
            scheduling_url: DEFAULT_SCHEDULING_URL.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

/// Configuration baked into this build.
#[must_use]
pub fn site_config() -> SiteConfig {
    config_from(
        option_env!("RAZORPAY_KEY_ID"),
        option_env!("COUNSEL_ORDER_ENDPOINT"),
        option_env!("CALENDLY_URL"),
        option_env!("COUNSEL_LOG"),
    )
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn config_from(
    key_id: Option<&str>,
    order_endpoint: Option<&str>,
    scheduling_url: Option<&str>,
    log_level: Option<&str>,
) -> SiteConfig {
    let payment = PaymentConfig {
        key_id: non_blank(key_id),
        ..PaymentConfig::default()
    };
    let payment = match non_blank(order_endpoint) {
        None => payment,
        Some(off) if off.eq_ignore_ascii_case("off") => payment.without_order_endpoint(),
        Some(endpoint) => payment.with_order_endpoint(endpoint),
    };
    SiteConfig {
        payment,
        scheduling_url: non_blank(scheduling_url)
            .unwrap_or_else(|| DEFAULT_SCHEDULING_URL.to_string()),
        log_level: crate::logging::parse_level(log_level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counsel_core::DEFAULT_ORDER_ENDPOINT;

    #[test]
    fn empty_environment_disables_payments() {
        let config = config_from(None, None, None, None);
        assert_eq!(config, SiteConfig::default());
        assert!(config.payment.key().is_none());
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = config_from(Some("  "), Some(""), Some(" "), None);
        assert!(config.payment.key_id.is_none());
        assert_eq!(
            config.payment.order_endpoint.as_deref(),
            Some(DEFAULT_ORDER_ENDPOINT)
        );
        assert_eq!(config.scheduling_url, DEFAULT_SCHEDULING_URL);
    }

    #[test]
    fn order_endpoint_defaults_to_same_origin_and_can_be_switched_off() {
        let config = config_from(Some("rzp_test"), None, None, None);
        assert_eq!(
            config.payment.order_endpoint.as_deref(),
            Some("/api/create-order")
        );
        let config = config_from(Some("rzp_test"), Some(" OFF "), None, None);
        assert!(config.payment.order_endpoint.is_none());
    }

    #[test]
    fn values_are_trimmed_and_applied() {
        let config = config_from(
            Some(" rzp_live_abc "),
            Some("https://api.example.test/orders"),
            Some("https://calendly.com/someone/intro"),
            Some("debug"),
        );
        assert_eq!(config.payment.key(), Some("rzp_live_abc"));
        assert_eq!(
            config.payment.order_endpoint.as_deref(),
            Some("https://api.example.test/orders")
        );
        assert_eq!(config.scheduling_url, "https://calendly.com/someone/intro");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
