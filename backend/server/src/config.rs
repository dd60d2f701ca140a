use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Result, anyhow};
use tracing::{info, warn};
use whois::{ListingScope, SquadScope, remote::WHOIS_URL};

pub struct Config {
    pub port: u16,
    pub whois_url: String,
    pub whois_timeout: Duration,
    pub squad_name: String,
    pub tribe_name: String,
    pub cohort: String,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            port: try_load(&lookup, "PORT", "8000")?,
            whois_url: try_load(&lookup, "WHOIS_URL", WHOIS_URL)?,
            whois_timeout: Duration::from_secs(try_load(&lookup, "WHOIS_TIMEOUT_SECS", "5")?),
            squad_name: try_load(&lookup, "SQUAD_NAME", "1G")?,
            tribe_name: try_load(&lookup, "TRIBE_NAME", "FDND Jaar 1")?,
            cohort: try_load(&lookup, "COHORT", "2425")?,
            static_dir: try_load(&lookup, "STATIC_DIR", "public")?,
        })
    }

    pub fn listing_scope(&self) -> ListingScope {
        ListingScope::new(self.squad_name.as_str())
    }

    pub fn squad_scope(&self) -> SquadScope {
        SquadScope {
            tribe: self.tribe_name.clone(),
            cohort: self.cohort.clone(),
        }
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Environment misconfigured, invalid {key} value {value:?}: {e}")
    })
}
