use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

use crate::services::calculator::engine::MAX_WASTAGE_PERCENT;
use crate::services::calculator::WastageDefaults;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // Catalog database
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout_seconds: u64,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Calculator
    pub wastage: WastageDefaults,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // Catalog database
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let database_acquire_timeout_seconds = env::var("DATABASE_ACQUIRE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Calculator wastage defaults (percent)
        let stock = WastageDefaults::default();
        let wastage = WastageDefaults {
            area: wastage_var("WASTAGE_AREA_PERCENT", stock.area)?,
            volume: wastage_var("WASTAGE_VOLUME_PERCENT", stock.volume)?,
            linear: wastage_var("WASTAGE_LINEAR_PERCENT", stock.linear)?,
        };

        Ok(Settings {
            env,
            server_addr,
            database_url,
            database_max_connections,
            database_acquire_timeout_seconds,
            cors_allow_origins,
            wastage,
        })
    }
}

fn wastage_var(name: &str, default: Decimal) -> Result<Decimal> {
    match env::var(name) {
        Ok(raw) => parse_wastage(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_wastage(name: &str, raw: &str) -> Result<Decimal> {
    let value = Decimal::from_str(raw.trim())
        .with_context(|| format!("{} must be a decimal percentage", name))?;
    if value < Decimal::ZERO || value > Decimal::from(MAX_WASTAGE_PERCENT) {
        bail!("{} must be between 0 and {}, got {}", name, MAX_WASTAGE_PERCENT, value);
    }
    Ok(value)
}
