#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: String,
    pub admin_username: String,
    pub admin_password: String,
    pub session_hours: u32,
    pub geoip_path: String,
    pub duckdb_memory_limit: String,
    pub https: bool,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("FOLIO_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            db_path: std::env::var("FOLIO_DB_PATH")
                .unwrap_or_else(|_| "./portfolio.db".to_string()),
            admin_username: std::env::var("FOLIO_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            admin_password: std::env::var("FOLIO_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "portfolio2024!".to_string()),
            session_hours: std::env::var("FOLIO_SESSION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            geoip_path: std::env::var("FOLIO_GEOIP_PATH")
                .unwrap_or_else(|_| "./GeoLite2-City.mmdb".to_string()),
            duckdb_memory_limit: std::env::var("FOLIO_DUCKDB_MEMORY")
                .unwrap_or_else(|_| "512MB".to_string()),
            https: std::env::var("FOLIO_HTTPS")
                .map(|v| v == "true")
                .unwrap_or(false),
            cors_origins: std::env::var("FOLIO_CORS_ORIGINS")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }

    /// Cookie Max-Age for the admin session, in seconds.
    pub fn session_max_age_seconds(&self) -> u64 {
        u64::from(self.session_hours) * 3600
    }
}
