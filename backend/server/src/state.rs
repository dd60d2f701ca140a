use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use whois::{ListingScope, Squad, SquadScope, WhoisClient, WhoisError};

use super::{config::Config, render::Views};

pub struct State {
    pub config: Config,
    pub whois: WhoisClient,
    pub listing_scope: ListingScope,
    pub squads: Vec<Squad>,
    pub views: Views,
}

impl State {
    /// Fails when the squad list can not be loaded; there is no serving
    /// without it.
    pub async fn new(config: Config) -> Result<Arc<Self>> {
        let whois = WhoisClient::new(&config.whois_url, config.whois_timeout)
            .context("Failed to create WHOIS client")?;

        let views = Views::new(&config.squad_name).context("Failed to compile templates")?;

        let squads = init_squad_cache(&whois, &config.squad_scope())
            .await
            .context("Failed to fetch squads")?;

        let listing_scope = config.listing_scope();

        Ok(Arc::new(Self {
            config,
            whois,
            listing_scope,
            squads,
            views,
        }))
    }
}

pub async fn init_squad_cache(
    whois: &WhoisClient,
    scope: &SquadScope,
) -> Result<Vec<Squad>, WhoisError> {
    let squads = whois.fetch_squads(scope).await?;

    if squads.is_empty() {
        warn!(
            "No squads found for tribe {} cohort {}",
            scope.tribe, scope.cohort
        );
    } else {
        info!("Fetched {} squads", squads.len());
    }

    Ok(squads)
}
