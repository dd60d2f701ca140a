use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::WhoisError,
    models::{Envelope, Person, Squad},
    query::{DETAIL_FIELDS, ListingQuery, PERSON_COLLECTION, SQUAD_COLLECTION, SquadScope},
};

pub const WHOIS_URL: &str = "https://fdnd.directus.app";

pub struct WhoisClient {
    client: Client,
    base_url: Url,
}

impl WhoisClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WhoisError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| WhoisError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(WhoisError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub async fn fetch_squads(&self, scope: &SquadScope) -> Result<Vec<Squad>, WhoisError> {
        let url = self.items_url(&[SQUAD_COLLECTION])?;
        let envelope: Envelope<Vec<Squad>> = self.get_json(url, &scope.params()).await?;

        Ok(envelope.data)
    }

    pub async fn fetch_persons(&self, query: &ListingQuery) -> Result<Vec<Person>, WhoisError> {
        let url = self.items_url(&[PERSON_COLLECTION])?;
        let envelope: Envelope<Vec<Person>> = self.get_json(url, &query.params()).await?;

        Ok(envelope.data)
    }

    /// Absent records come back as 403 (Directus hides what the public role
    /// can not see), 404 or a `null` payload. All three map to `NotFound`.
    /// So does an id that would be dropped or resolved as a dot segment.
    pub async fn fetch_person(&self, id: &str) -> Result<Person, WhoisError> {
        if matches!(id.trim(), "" | "." | "..") {
            return Err(WhoisError::NotFound);
        }

        let url = self.items_url(&[PERSON_COLLECTION, id])?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .query(&[("fields", DETAIL_FIELDS.join(","))])
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN
        ) {
            return Err(WhoisError::NotFound);
        }

        let envelope: Envelope<Option<Person>> = read_json(response).await?;

        envelope.data.ok_or(WhoisError::NotFound)
    }

    /// Each segment is percent-encoded, so a path parameter can never escape
    /// into the query string.
    fn items_url(&self, segments: &[&str]) -> Result<Url, WhoisError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| WhoisError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("items")
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, WhoisError> {
        debug!("GET {url}");

        let response = self.client.get(url).query(params).send().await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, WhoisError> {
    let status = response.status();
    if !status.is_success() {
        return Err(WhoisError::Status(status));
    }

    let json_string = response.text().await?;

    Ok(serde_json::from_str(&json_string)?)
}
