use std::env;

pub const DEFAULT_PAGE_SIZE: u64 = 15;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Rows per page on paginated admin indexes
    pub page_size: u64,
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://whitehall.db?mode=rwc".to_string(),
            port: 3000,
            cors_allowed_origins: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            seed_demo: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|&p| p > 0)
                .unwrap_or(defaults.page_size),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }
}
