use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite:crm.db");

        let host: IpAddr = env_or("CRM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CRM_HOST: {e}"))?;

        let port: u16 = env_or("CRM_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid CRM_PORT: {e}"))?;

        let debug = matches!(
            env_or("CRM_DEBUG", "false").to_lowercase().as_str(),
            "true" | "1" | "t"
        );

        let default_level = if debug { "debug" } else { "info" };
        let log_level = env_or("CRM_LOG_LEVEL", default_level);

        Ok(Config {
            database_url,
            host,
            port,
            debug,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
