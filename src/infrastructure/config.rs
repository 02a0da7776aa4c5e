use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SettingsError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Missing(name) => write!(f, "{} is not set", name),
            SettingsError::Invalid(name, value) => {
                write!(f, "{} has invalid value: {}", name, value)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Process configuration, read once at startup from the environment (with
/// `.env` loaded first by the caller).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_port: u16,
    pub uploads_dir: PathBuf,
    pub vector_service_url: String,
    pub vector_service_api_key: Option<String>,
    pub credential_master_secret: String,
    pub ingestion_workers: usize,
    pub http_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| SettingsError::Missing("DATABASE_URL"))?;

        let vector_service_url = env::var("VECTOR_SERVICE_URL")
            .map_err(|_| SettingsError::Missing("VECTOR_SERVICE_URL"))?;

        let credential_master_secret = env::var("CREDENTIAL_MASTER_SECRET")
            .map_err(|_| SettingsError::Missing("CREDENTIAL_MASTER_SECRET"))?;

        let bind_port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| SettingsError::Invalid("PORT", value))?,
            Err(_) => 3000,
        };

        let ingestion_workers = match env::var("INGESTION_WORKERS") {
            Ok(value) => value
                .parse::<usize>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or(SettingsError::Invalid("INGESTION_WORKERS", value))?,
            Err(_) => 3,
        };

        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| SettingsError::Invalid("HTTP_TIMEOUT_SECS", value))?,
            Err(_) => 30,
        };

        Ok(Self {
            database_url,
            bind_port,
            uploads_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            ),
            vector_service_url,
            vector_service_api_key: env::var("VECTOR_SERVICE_API_KEY").ok(),
            credential_master_secret,
            ingestion_workers,
            http_timeout_secs,
        })
    }
}
