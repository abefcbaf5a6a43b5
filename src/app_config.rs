use anyhow::{anyhow, Context};
use std::env;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dev,
    Test,
    Local,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub max_overflow: u32,
}

impl DatabaseConfig {
    pub fn max_connections(&self) -> u32 {
        self.pool_size + self.max_overflow
    }
}

#[derive(Debug, Clone)]
pub struct SuperheroApiConfig {
    pub base_url: Url,
    pub token: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub superhero_api: SuperheroApiConfig,
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .map(|v| v.parse::<T>())
        .unwrap_or(Ok(default))
        .context(key.to_string())
}

fn database_url() -> anyhow::Result<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }
    let user = env::var("POSTGRES_USER").context("POSTGRES_USER")?;
    let password = env::var("POSTGRES_PASSWORD").context("POSTGRES_PASSWORD")?;
    let host = env::var("POSTGRES_HOST").context("POSTGRES_HOST")?;
    let port = env::var("POSTGRES_PORT").context("POSTGRES_PORT")?;
    let db = env::var("POSTGRES_DB").context("POSTGRES_DB")?;
    Ok(format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, db
    ))
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<AppConfig> {
        let mode = match env::var("MODE").unwrap_or_else(|_| "DEV".to_owned()).as_str() {
            "DEV" => Mode::Dev,
            "TEST" => Mode::Test,
            "LOCAL" => Mode::Local,
            _ => Err(anyhow!("Invalid mode")).context("MODE")?,
        };
        let host = env::var("HOST").unwrap_or_else(|_| "localhost".to_owned());
        let port = parse_or("PORT", 8080u16)?;

        let database = DatabaseConfig {
            url: database_url()?,
            pool_size: parse_or("POOL_SIZE", 5u32)?,
            max_overflow: parse_or("MAX_OVERFLOW", 10u32)?,
        };

        let superhero_api = SuperheroApiConfig {
            base_url: Url::parse(
                &env::var("SUPERHERO_API_BASE_URL")
                    .unwrap_or_else(|_| "https://superheroapi.com/api".to_owned()),
            )
            .context("SUPERHERO_API_BASE_URL")?,
            token: env::var("SUPERHERO_API_TOKEN").context("SUPERHERO_API_TOKEN")?,
            timeout_secs: parse_or("SUPERHERO_API_TIMEOUT_SECS", 10u64)?,
        };

        Ok(AppConfig {
            mode,
            host,
            port,
            database,
            superhero_api,
        })
    }
}
