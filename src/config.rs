use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    /// Optional JSON seed file loaded into the store at startup.
    pub seed_path: Option<String>,
    /// Upper bound applied to the per_page query value.
    pub max_per_page: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
            seed_path: env::var("SEED_PATH").ok(),
            max_per_page: env::var("MAX_PER_PAGE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            api_prefix: "/api/v1".to_string(),
            seed_path: None,
            max_per_page: 100,
        }
    }
}
