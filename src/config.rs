use crate::domain::Decimal;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub market_api_url: String,
    /// Silver per weight unit before route and carry multipliers.
    pub base_silver_per_weight: Decimal,
    /// Fraction taken off every sale, in `[0, 1)`.
    pub sales_tax_rate: Decimal,
    pub request_timeout: Duration,
    pub history_days: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            market_api_url: "https://west.albion-online-data.com/api/v2".to_string(),
            base_silver_per_weight: Decimal::from(5u64),
            sales_tax_rate: Decimal::from_scaled(65, 3),
            request_timeout: Duration::from_millis(10_000),
            history_days: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let market_api_url = match env_map.get("MARKET_API_URL").map(|s| s.trim()) {
            Some("") => return Err(ConfigError::MissingEnv("MARKET_API_URL".to_string())),
            Some(url) => url.to_string(),
            None => defaults.market_api_url,
        };

        let base_silver_per_weight = parse_decimal(&env_map, "BASE_SILVER_PER_WEIGHT")?
            .unwrap_or(defaults.base_silver_per_weight);
        if base_silver_per_weight.is_negative() {
            return Err(ConfigError::InvalidValue(
                "BASE_SILVER_PER_WEIGHT".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let sales_tax_rate =
            parse_decimal(&env_map, "SALES_TAX_RATE")?.unwrap_or(defaults.sales_tax_rate);
        if sales_tax_rate.is_negative() || sales_tax_rate >= Decimal::one() {
            return Err(ConfigError::InvalidValue(
                "SALES_TAX_RATE".to_string(),
                format!("must be in [0, 1), got {}", sales_tax_rate),
            ));
        }

        let request_timeout_ms = env_map
            .get("REQUEST_TIMEOUT_MS")
            .map(|s| s.as_str())
            .unwrap_or("10000")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "REQUEST_TIMEOUT_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        let history_days = env_map
            .get("HISTORY_DAYS")
            .map(|s| s.as_str())
            .unwrap_or("10")
            .parse::<u32>()
            .ok()
            .filter(|days| *days >= 1)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "HISTORY_DAYS".to_string(),
                    "must be an integer >= 1".to_string(),
                )
            })?;

        Ok(Config {
            port,
            market_api_url,
            base_silver_per_weight,
            sales_tax_rate,
            request_timeout: Duration::from_millis(request_timeout_ms),
            history_days,
        })
    }
}

fn parse_decimal(
    env_map: &HashMap<String, String>,
    key: &str,
) -> Result<Option<Decimal>, ConfigError> {
    env_map
        .get(key)
        .map(|raw| {
            Decimal::from_str_canonical(raw).map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "must be a decimal number".to_string())
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.market_api_url,
            "https://west.albion-online-data.com/api/v2"
        );
        assert_eq!(config.base_silver_per_weight, Decimal::from(5u64));
        assert_eq!(config.sales_tax_rate, Decimal::from_scaled(65, 3));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.history_days, 10);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_env_map(env(&[
            ("PORT", "9000"),
            ("MARKET_API_URL", "http://localhost:3000/api/v2"),
            ("BASE_SILVER_PER_WEIGHT", "7.5"),
            ("SALES_TAX_RATE", "0.04"),
            ("REQUEST_TIMEOUT_MS", "2500"),
            ("HISTORY_DAYS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.market_api_url, "http://localhost:3000/api/v2");
        assert_eq!(config.base_silver_per_weight, Decimal::from_scaled(75, 1));
        assert_eq!(config.sales_tax_rate, Decimal::from_scaled(4, 2));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.history_days, 30);
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_env_map(env(&[("PORT", "not_a_number")]));
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_empty_market_api_url() {
        let result = Config::from_env_map(env(&[("MARKET_API_URL", "  ")]));
        match result {
            Err(ConfigError::MissingEnv(k)) => assert_eq!(k, "MARKET_API_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_sales_tax_out_of_range() {
        for raw in ["1", "1.5", "-0.1", "abc"] {
            let result = Config::from_env_map(env(&[("SALES_TAX_RATE", raw)]));
            match result {
                Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "SALES_TAX_RATE"),
                _ => panic!("Expected InvalidValue error for {}", raw),
            }
        }
    }

    #[test]
    fn test_zero_history_days() {
        let result = Config::from_env_map(env(&[("HISTORY_DAYS", "0")]));
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HISTORY_DAYS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_negative_base_cost() {
        let result = Config::from_env_map(env(&[("BASE_SILVER_PER_WEIGHT", "-1")]));
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BASE_SILVER_PER_WEIGHT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
