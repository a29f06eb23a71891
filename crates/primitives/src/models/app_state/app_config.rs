use crate::models::app_state::paypal_details::PaypalInfo;
use eyre::{eyre, Report};
use std::env;
use std::net::SocketAddr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_env: String,

    pub host: String,
    pub port: u16,

    pub cors_origins: String,

    pub paypal_details: PaypalInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e| eyre!("PORT must be a valid port number: {}", e))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),

            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.into()),
            port,

            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            paypal_details: PaypalInfo::new()?,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, Report> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| eyre!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }

    pub fn is_test(&self) -> bool {
        self.app_env == "test"
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const OPTIONAL_VARS: [&str; 5] = ["APP_ENV", "HOST", "PORT", "CORS_ORIGINS", "PAYPAL_API_URL"];

    fn with_credentials() {
        env::set_var("PAYPAL_CLIENT_ID", "client-id");
        env::set_var("PAYPAL_CLIENT_SECRET", "client-secret");
        env::set_var("PAYPAL_ENVIRONMENT", "sandbox");
        for var in OPTIONAL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn from_env_applies_defaults() {
        with_credentials();

        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.app_env, "development");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, "http://localhost:3000");
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn from_env_reads_bind_address() {
        with_credentials();
        env::set_var("HOST", "127.0.0.1");
        env::set_var("PORT", "9090");

        let config = AppConfig::from_env().unwrap();
        env::remove_var("HOST");
        env::remove_var("PORT");

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9090");
    }

    #[test]
    #[serial]
    fn from_env_rejects_bad_port() {
        with_credentials();
        env::set_var("PORT", "eighty");

        let result = AppConfig::from_env();
        env::remove_var("PORT");

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn from_env_requires_paypal_credentials() {
        with_credentials();
        env::remove_var("PAYPAL_CLIENT_SECRET");

        let err = AppConfig::from_env().unwrap_err();

        assert!(err.to_string().contains("PAYPAL_CLIENT_SECRET"));
    }
}
