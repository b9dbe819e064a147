mod types;

pub use types::*;

use anyhow::{Context, Result};
use reqwest::Url;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./bookscout.toml",
        "~/.config/bookscout/config.toml",
        "/etc/bookscout/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Parse the configured catalog endpoint.
pub fn endpoint_url(config: &CatalogConfig) -> Result<Url> {
    let url = Url::parse(&config.endpoint)
        .with_context(|| format!("Invalid catalog endpoint: {}", config.endpoint))?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "Catalog endpoint must be an http(s) URL, got scheme '{}'",
            url.scheme()
        );
    }

    Ok(url)
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    endpoint_url(&config.catalog)?;

    if config.catalog.connect_timeout_secs == 0 {
        anyhow::bail!("catalog.connect_timeout_secs cannot be 0");
    }
    if config.catalog.read_timeout_secs == 0 {
        anyhow::bail!("catalog.read_timeout_secs cannot be 0");
    }
    if config.images.timeout_secs == 0 {
        anyhow::bail!("images.timeout_secs cannot be 0");
    }
    if config.images.max_concurrent == Some(0) {
        anyhow::bail!("images.max_concurrent must be at least 1 when set");
    }
    if config.search.no_author.trim().is_empty() {
        tracing::warn!("search.no_author is blank; books without authors will show an empty author line");
    }

    Ok(())
}
