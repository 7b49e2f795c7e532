use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_ANALYTICS_WINDOW_DAYS: i64 = 30;
/// Longest report window, in days, for defaults and explicit date ranges.
pub const MAX_ANALYTICS_WINDOW_DAYS: i64 = 3660;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub seed_mock_data: bool,
    pub analytics_default_window_days: i64,
    pub clinic_name: String,
    pub nurse_line_phone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            seed_mock_data: true,
            analytics_default_window_days: DEFAULT_ANALYTICS_WINDOW_DAYS,
            clinic_name: "Luxe Medical Spa".to_string(),
            nurse_line_phone: "(555) 123-4567".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| {
                    warn!("SERVER_HOST not set, using default");
                    defaults.server_host.clone()
                }),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            seed_mock_data: parse_var("SEED_MOCK_DATA", defaults.seed_mock_data),
            analytics_default_window_days: analytics_window_days(parse_var(
                "ANALYTICS_DEFAULT_WINDOW_DAYS",
                defaults.analytics_default_window_days,
            )),
            clinic_name: env::var("CLINIC_NAME")
                .unwrap_or_else(|_| defaults.clinic_name.clone()),
            nurse_line_phone: env::var("NURSE_LINE_PHONE")
                .unwrap_or_else(|_| {
                    warn!("NURSE_LINE_PHONE not set, using default");
                    defaults.nurse_line_phone.clone()
                }),
        };

        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// The configured analytics window, with out-of-range values replaced
    /// by the default.
    pub fn analytics_window_days(&self) -> i64 {
        analytics_window_days(self.analytics_default_window_days)
    }
}

/// Keeps a window within `1..=MAX_ANALYTICS_WINDOW_DAYS`, falling back to
/// `DEFAULT_ANALYTICS_WINDOW_DAYS` otherwise.
pub fn analytics_window_days(days: i64) -> i64 {
    if (1..=MAX_ANALYTICS_WINDOW_DAYS).contains(&days) {
        days
    } else {
        warn!(
            "ANALYTICS_DEFAULT_WINDOW_DAYS must be between 1 and {}, got {}, using default {}",
            MAX_ANALYTICS_WINDOW_DAYS, days, DEFAULT_ANALYTICS_WINDOW_DAYS
        );
        DEFAULT_ANALYTICS_WINDOW_DAYS
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {:?}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {:?}", name, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_3000() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert!(config.seed_mock_data);
    }

    #[test]
    fn out_of_range_analytics_window_falls_back_to_default() {
        assert_eq!(analytics_window_days(7), 7);
        assert_eq!(analytics_window_days(MAX_ANALYTICS_WINDOW_DAYS), MAX_ANALYTICS_WINDOW_DAYS);
        assert_eq!(analytics_window_days(0), DEFAULT_ANALYTICS_WINDOW_DAYS);
        assert_eq!(analytics_window_days(-7), DEFAULT_ANALYTICS_WINDOW_DAYS);
        assert_eq!(analytics_window_days(i64::MAX / 2), DEFAULT_ANALYTICS_WINDOW_DAYS);

        let config = AppConfig {
            analytics_default_window_days: -7,
            ..AppConfig::default()
        };
        assert_eq!(config.analytics_window_days(), DEFAULT_ANALYTICS_WINDOW_DAYS);
    }
}
