//! Environment-driven configuration

use std::path::PathBuf;

use crate::auth::DEFAULT_OTP_CODE;
use crate::billing::DEFAULT_TAX_PERCENT;
use crate::cart::AmbiguityPolicy;
use crate::catalog::DEFAULT_PAGE_SIZE;

/// Kiosk configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (flag file, logs) |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (unset) | Write logs to daily files in this directory |
/// | TAX_PERCENT | 5 | Tax rate applied to the bill, in percent (0 to 100) |
/// | ITEMS_PER_PAGE | 12 | Products per catalog page |
/// | OTP_CODE | 1290 | Accepted login code |
/// | CART_AMBIGUITY_POLICY | reject | `reject` or `most_recent` |
/// | CATALOG_PATH | (unset) | JSON catalog file; the bundled menu otherwise |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/kiosk CART_AMBIGUITY_POLICY=most_recent cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the flag file and logs
    pub work_dir: String,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub tax_percent: f64,
    pub items_per_page: u32,
    pub otp_code: String,
    pub ambiguity_policy: AmbiguityPolicy,
    pub catalog_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let ambiguity_policy = match non_empty("CART_AMBIGUITY_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(
                    value = %raw,
                    error = %e,
                    "Invalid CART_AMBIGUITY_POLICY, using reject"
                );
                AmbiguityPolicy::default()
            }),
            None => AmbiguityPolicy::default(),
        };

        Self {
            work_dir: non_empty("WORK_DIR").unwrap_or_else(|| "./data".into()),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
            tax_percent: non_empty("TAX_PERCENT")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| (0.0..=100.0).contains(v))
                .unwrap_or(DEFAULT_TAX_PERCENT),
            items_per_page: non_empty("ITEMS_PER_PAGE")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            otp_code: non_empty("OTP_CODE").unwrap_or_else(|| DEFAULT_OTP_CODE.into()),
            ambiguity_policy,
            catalog_path: non_empty("CATALOG_PATH"),
        }
    }

    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.work_dir, "./data");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_dir, None);
        assert_eq!(config.tax_percent, 5.0);
        assert_eq!(config.items_per_page, 12);
        assert_eq!(config.otp_code, "1290");
        assert_eq!(config.ambiguity_policy, AmbiguityPolicy::Reject);
        assert_eq!(config.catalog_path, None);
        assert!(config.is_development());
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("WORK_DIR", "/var/lib/kiosk"),
            ("ENVIRONMENT", "production"),
            ("TAX_PERCENT", "18"),
            ("ITEMS_PER_PAGE", "8"),
            ("CART_AMBIGUITY_POLICY", "most_recent"),
            ("CATALOG_PATH", "/etc/kiosk/menu.json"),
            ("LOG_DIR", "/var/log/kiosk"),
        ]);
        assert_eq!(config.work_dir_path(), PathBuf::from("/var/lib/kiosk"));
        assert!(config.is_production());
        assert_eq!(config.tax_percent, 18.0);
        assert_eq!(config.items_per_page, 8);
        assert_eq!(config.ambiguity_policy, AmbiguityPolicy::MostRecent);
        assert_eq!(config.catalog_path.as_deref(), Some("/etc/kiosk/menu.json"));
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/kiosk"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_with(&[
            ("TAX_PERCENT", "250"),
            ("ITEMS_PER_PAGE", "0"),
            ("CART_AMBIGUITY_POLICY", "coin-flip"),
            ("LOG_DIR", "  "),
        ]);
        assert_eq!(config.tax_percent, 5.0);
        assert_eq!(config.items_per_page, 12);
        assert_eq!(config.ambiguity_policy, AmbiguityPolicy::Reject);
        assert_eq!(config.log_dir, None);
    }
}
