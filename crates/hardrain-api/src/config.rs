//! Environment configuration.

use std::net::SocketAddr;

use hardrain_generator::OpenAiConfig;

use crate::error::AppError;

/// Everything the server reads from its environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// `PostgreSQL` URL; without it lines are only logged.
    pub database_url: Option<String>,
    /// Generator connection settings.
    pub generator: OpenAiConfig,
    /// Fixed seed for stanza-length sampling.
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `OPENAI_API_KEY` is missing, or if
    /// `PORT`, `GENERATOR_TEMPERATURE`, or `RNG_SEED` do not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = lookup("PORT")
            .map_or(Ok(3000), |v| v.parse())
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());

        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Config("OPENAI_API_KEY environment variable must be set".to_owned())
            })?;
        let mut generator = OpenAiConfig::new(api_key);
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            generator.base_url = base_url;
        }
        if let Some(model) = lookup("GENERATOR_MODEL") {
            generator.model = model;
        }
        if let Some(temperature) = lookup("GENERATOR_TEMPERATURE") {
            generator.temperature = temperature.parse().map_err(|e| {
                AppError::Config(format!("GENERATOR_TEMPERATURE must be a number: {e}"))
            })?;
        }

        let rng_seed = lookup("RNG_SEED")
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| AppError::Config(format!("RNG_SEED must be a valid u64: {e}")))?;

        Ok(Self {
            host,
            port,
            database_url,
            generator,
            rng_seed,
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
