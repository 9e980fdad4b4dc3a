use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `VENUEDESK__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub billing: BillingConfig,
    #[serde(default)]
    pub holds: HoldsConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Knobs for the customer lifetime analytics transform.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Trailing activity window in days (the "12-month" window).
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    /// Assumed customer tenure in years for the CLV projection.
    #[serde(default = "default_tenure_multiplier")]
    pub tenure_multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// GST rate as a fraction (0.10 = 10%).
    #[serde(default = "default_gst_rate")]
    pub gst_rate: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoldsConfig {
    /// How long a newly placed hold lives before expiring.
    #[serde(default = "default_hold_ttl_minutes")]
    pub default_ttl_minutes: i64,
    /// Holds expiring within this horizon are surfaced on the dashboard.
    #[serde(default = "default_expiring_soon_minutes")]
    pub expiring_soon_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

// Default functions
fn default_window_days() -> i64 {
    365
}
fn default_tenure_multiplier() -> f64 {
    2.5
}
fn default_gst_rate() -> f64 {
    0.10
}
fn default_currency() -> String {
    "AUD".to_string()
}
fn default_hold_ttl_minutes() -> i64 {
    2880
}
fn default_expiring_soon_minutes() -> i64 {
    1440
}
fn default_page_size() -> usize {
    25
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            tenure_multiplier: default_tenure_multiplier(),
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            gst_rate: default_gst_rate(),
            currency: default_currency(),
        }
    }
}

impl Default for HoldsConfig {
    fn default() -> Self {
        Self {
            default_ttl_minutes: default_hold_ttl_minutes(),
            expiring_soon_minutes: default_expiring_soon_minutes(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            billing: BillingConfig::default(),
            holds: HoldsConfig::default(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("VENUEDESK")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.analytics.window_days, 365);
        assert!((config.analytics.tenure_multiplier - 2.5).abs() < f64::EPSILON);
        assert!((config.billing.gst_rate - 0.10).abs() < f64::EPSILON);
        assert_eq!(config.holds.default_ttl_minutes, 2880);
        assert_eq!(config.directory.page_size, 25);
    }
}
