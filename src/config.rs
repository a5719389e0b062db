/*
 * Responsibility
 * - Load environment / .env settings (identity provider, generation backend, CORS, ...)
 * - Validate values (missing or malformed required keys fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub clerk_secret_key: String,
    pub clerk_jwt_public_key_pem: String,
    pub clerk_api_url: String,
    pub clerk_authorized_parties: Vec<String>,
    pub auth_clock_leeway_seconds: u64,

    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_url: String,

    pub degraded_mode: bool,
    pub prompt_dir: String,
    pub upstream_timeout_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets stay out of logs
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("clerk_api_url", &self.clerk_api_url)
            .field("clerk_authorized_parties", &self.clerk_authorized_parties)
            .field("auth_clock_leeway_seconds", &self.auth_clock_leeway_seconds)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_url", &self.gemini_api_url)
            .field("degraded_mode", &self.degraded_mode)
            .field("prompt_dir", &self.prompt_dir)
            .field("upstream_timeout_seconds", &self.upstream_timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = split_list(lookup("CORS_ALLOWED_ORIGINS"));

        let clerk_secret_key = required(&lookup, "CLERK_SECRET_KEY")?;

        let clerk_jwt_public_key_pem =
            required(&lookup, "CLERK_JWT_PUBLIC_KEY_PEM")?.replace("\\n", "\n");

        let clerk_api_url = lookup("CLERK_API_URL")
            .unwrap_or_else(|| "https://api.clerk.com/v1".to_string());
        url::Url::parse(&clerk_api_url).map_err(|_| ConfigError::Invalid("CLERK_API_URL"))?;

        let clerk_authorized_parties = split_list(lookup("CLERK_AUTHORIZED_PARTIES"));

        let auth_clock_leeway_seconds = match lookup("AUTH_CLOCK_LEEWAY_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("AUTH_CLOCK_LEEWAY_SECONDS"))?,
            None => 5,
        };

        // Generation backend key is a startup requirement, never a per-request failure.
        let gemini_api_key = required(&lookup, "GEMINI_API_KEY")?;

        let gemini_model = lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-pro".to_string());

        let gemini_api_url = lookup("GEMINI_API_URL")
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string());
        url::Url::parse(&gemini_api_url).map_err(|_| ConfigError::Invalid("GEMINI_API_URL"))?;

        let degraded_mode = match lookup("ADVISORY_DEGRADED_MODE") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid("ADVISORY_DEGRADED_MODE"))?,
            None => false,
        };

        let prompt_dir = lookup("PROMPT_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "prompts".to_string());

        let upstream_timeout_seconds = match lookup("UPSTREAM_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ConfigError::Invalid("UPSTREAM_TIMEOUT_SECONDS"))?,
            None => 20,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            clerk_secret_key,
            clerk_jwt_public_key_pem,
            clerk_api_url,
            clerk_authorized_parties,
            auth_clock_leeway_seconds,
            gemini_api_key,
            gemini_model,
            gemini_api_url,
            degraded_mode,
            prompt_dir,
            upstream_timeout_seconds,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
