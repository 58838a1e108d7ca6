use anyhow::{Result, anyhow, bail, ensure};
use config::{Config, File, Source};
use serde::Deserialize;
use url::Url;

use crate::domain::{DEFAULT_POSTS_PER_PAGE, MAX_PAGE_LIMIT};

const DEFAULT_CONFIG_PATH: &str = "settings.yml";
const APP_PORT_ENV: &str = "APP_PORT";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const POSTS_PER_PAGE_ENV: &str = "POSTS_PER_PAGE";
const CACHE_REPORT_INTERVAL_ENV: &str = "CACHE_REPORT_INTERVAL_S";

const DEFAULT_CACHE_REPORT_INTERVAL_S: u64 = 300;

#[derive(Debug)]
pub struct Settings {
    pub port: u16,
    pub database_url: Url,
    pub posts_per_page: u32,
    /// seconds between two page cache usage reports
    pub cache_report_interval_s: u64,
}

#[derive(Deserialize, Debug)]
struct DefaultConfig {
    app_port: u16,
    db_name: String,
    db_host: String,
    db_port: u16,
    db_user: String,
    db_pass: String,
    #[serde(default = "default_posts_per_page")]
    posts_per_page: u32,
    #[serde(default = "default_cache_report_interval_s")]
    cache_report_interval_s: u64,
}

fn default_posts_per_page() -> u32 {
    DEFAULT_POSTS_PER_PAGE
}

fn default_cache_report_interval_s() -> u64 {
    DEFAULT_CACHE_REPORT_INTERVAL_S
}

impl DefaultConfig {
    fn database_url(&self) -> Result<Url> {
        let url_str = format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_pass, self.db_host, self.db_port, self.db_name
        );
        Ok(Url::parse(&url_str)?)
    }
}

fn read_config<S>(source: S) -> Result<DefaultConfig>
where
    S: Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(source)
        .build()
        .map_err(|_| anyhow!("Failed to read config file"))?;

    settings
        .try_deserialize::<DefaultConfig>()
        .map_err(|e| anyhow!("Failed to deserialize config file: {e}"))
}

fn load_default_config() -> Result<DefaultConfig> {
    read_config(File::with_name(DEFAULT_CONFIG_PATH))
}

/// Try to parse env variable. If it's not set, return None. If it's invalid, treat it as an error.
fn try_from_env<T, F>(env_var: &str, f: F) -> Result<Option<T>>
where
    F: FnOnce(String) -> Result<T>,
{
    match std::env::var(env_var) {
        Ok(raw) => {
            let val = f(raw).map_err(|_| anyhow!("Failed to parse {}", env_var))?;
            Ok(Some(val))
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(_) => bail!("Could not read {env_var} from env"),
    }
}

fn validate(settings: Settings) -> Result<Settings> {
    ensure!(settings.posts_per_page >= 1, "posts_per_page must be at least 1");
    ensure!(
        settings.posts_per_page <= MAX_PAGE_LIMIT,
        "posts_per_page must be at most {MAX_PAGE_LIMIT}"
    );
    ensure!(
        settings.cache_report_interval_s >= 1,
        "cache_report_interval_s must be at least 1"
    );
    Ok(settings)
}

/// Load configuration from env with fallback to default config file. Skips the file if port and
/// database url are both set in env.
pub fn load() -> Result<Settings> {
    let port_opt: Option<u16> = try_from_env(APP_PORT_ENV, |env_str| {
        env_str.parse::<u16>().map_err(|e| e.into())
    })?;

    let database_url_opt: Option<Url> = try_from_env(DATABASE_URL_ENV, |env_str| {
        Url::parse(&env_str).map_err(|e| e.into())
    })?;

    let posts_per_page_opt: Option<u32> = try_from_env(POSTS_PER_PAGE_ENV, |env_str| {
        env_str.parse::<u32>().map_err(|e| e.into())
    })?;

    let report_interval_opt: Option<u64> = try_from_env(CACHE_REPORT_INTERVAL_ENV, |env_str| {
        env_str.parse::<u64>().map_err(|e| e.into())
    })?;

    if let (Some(port), Some(database_url)) = (port_opt, database_url_opt.clone()) {
        return validate(Settings {
            port,
            database_url,
            posts_per_page: posts_per_page_opt.unwrap_or(DEFAULT_POSTS_PER_PAGE),
            cache_report_interval_s: report_interval_opt
                .unwrap_or(DEFAULT_CACHE_REPORT_INTERVAL_S),
        });
    }

    let config = load_default_config()?;

    let port = match port_opt {
        Some(val) => val,
        None => {
            tracing::warn!("{APP_PORT_ENV} is not set, using value from {DEFAULT_CONFIG_PATH}");
            config.app_port
        }
    };

    let database_url = match database_url_opt {
        Some(url) => url,
        None => {
            tracing::warn!("{DATABASE_URL_ENV} is not set, using value from {DEFAULT_CONFIG_PATH}");
            config.database_url()?
        }
    };

    validate(Settings {
        port,
        database_url,
        posts_per_page: posts_per_page_opt.unwrap_or(config.posts_per_page),
        cache_report_interval_s: report_interval_opt.unwrap_or(config.cache_report_interval_s),
    })
}
