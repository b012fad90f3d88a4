use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Shared plumbing for the datastore's PostgREST endpoint. Every request
/// carries the project key as both `apikey` and bearer token.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Insert rows and return the representation the datastore produced,
    /// including generated columns such as the row id.
    pub async fn insert_returning<T, R>(&self, table: &str, query: &str, body: &T) -> Result<Vec<R>>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut url = self.table_url(table);
        if !query.is_empty() {
            url = format!("{url}?{query}");
        }

        let response = self
            .post(&url)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, table, %detail, "datastore insert rejected");
            return Err(Error::Persistence(format!(
                "insert into {table} failed with status {status}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Insert rows without asking for a representation back.
    pub async fn insert<T>(&self, table: &str, body: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .post(&self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, table, %detail, "datastore insert rejected");
            return Err(Error::Persistence(format!(
                "insert into {table} failed with status {status}"
            )));
        }

        Ok(())
    }
}
