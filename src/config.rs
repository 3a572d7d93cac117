use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub relay_url: String,
    pub data_dir: String,
    pub question_total_min: u32,
    pub question_total_max: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let relay_url = settings
            .get_string("relay.url")
            .or_else(|_| env::var("RELAY_URL"))
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let data_dir = settings
            .get_string("storage.data_dir")
            .or_else(|_| env::var("DATA_DIR"))
            .unwrap_or_else(|_| "data".to_string());

        let question_total_min = settings
            .get_int("quiz.question_total_min")
            .ok()
            .or_else(|| {
                env::var("QUESTION_TOTAL_MIN")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or(5)
            .max(0) as u32;

        let question_total_max = settings
            .get_int("quiz.question_total_max")
            .ok()
            .or_else(|| {
                env::var("QUESTION_TOTAL_MAX")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or(50)
            .max(question_total_min as i64) as u32;

        Ok(Config {
            bind_addr,
            relay_url,
            data_dir,
            question_total_min,
            question_total_max,
        })
    }
}
