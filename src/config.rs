use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Origin of the SPA during development, for CORS. Unset means same-origin only.
    pub frontend_origin: Option<String>,

    // Security
    pub session_secret: Secret<String>,
    pub admin_enrollment_code: Secret<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for local development)
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        Ok(Self {
            database_url: config.get("database_url")?,
            host: config.get("host").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: config.get("port")?,

            frontend_origin: config.get("frontend_origin").ok(),

            session_secret: Secret::new(config.get("session_secret")?),
            admin_enrollment_code: Secret::new(config.get("admin_enrollment_code")?),
        })
    }
}
