use analysis_orchestrator::CacheConfig;
use anyhow::{bail, Context, Result};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    pub enable_hsts: bool,
    /// How often expired cache entries are swept
    pub cache_purge_interval_secs: u64,
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            enable_hsts: false,
            cache_purge_interval_secs: 600,
            cache: CacheConfig::default(),
        }
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source, falling back to defaults for unset keys.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let cache_defaults = CacheConfig::default();

        let config = Self {
            host: get("API_HOST").unwrap_or(defaults.host),
            port: parse_var(&get, "API_PORT", defaults.port)?,
            cors_origins: get("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty() && o != "*")
                        .collect()
                })
                .unwrap_or_default(),
            enable_hsts: get("ENABLE_HSTS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.enable_hsts),
            cache_purge_interval_secs: parse_var(
                &get,
                "CACHE_PURGE_INTERVAL_SECS",
                defaults.cache_purge_interval_secs,
            )?,
            cache: CacheConfig {
                analysis_ttl_secs: parse_var(&get, "ANALYSIS_CACHE_TTL_SECS", cache_defaults.analysis_ttl_secs)?,
                quote_ttl_secs: parse_var(&get, "QUOTE_CACHE_TTL_SECS", cache_defaults.quote_ttl_secs)?,
                history_ttl_secs: parse_var(&get, "HISTORY_CACHE_TTL_SECS", cache_defaults.history_ttl_secs)?,
                news_ttl_secs: parse_var(&get, "NEWS_CACHE_TTL_SECS", cache_defaults.news_ttl_secs)?,
                similar_ttl_secs: parse_var(&get, "SIMILAR_CACHE_TTL_SECS", cache_defaults.similar_ttl_secs)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("API_HOST must not be empty");
        }
        let ttls = [
            ("ANALYSIS_CACHE_TTL_SECS", self.cache.analysis_ttl_secs),
            ("QUOTE_CACHE_TTL_SECS", self.cache.quote_ttl_secs),
            ("HISTORY_CACHE_TTL_SECS", self.cache.history_ttl_secs),
            ("NEWS_CACHE_TTL_SECS", self.cache.news_ttl_secs),
            ("SIMILAR_CACHE_TTL_SECS", self.cache.similar_ttl_secs),
        ];
        for (key, ttl) in ttls {
            if ttl < 0 {
                bail!("{} must be >= 0 (got {})", key, ttl);
            }
        }
        if self.cache_purge_interval_secs == 0 {
            bail!("CACHE_PURGE_INTERVAL_SECS must be > 0");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
