//! HTTP API store.
//!
//! `GET {base}/shopping-list/` returns the JSON array of records and
//! `PUT {base}/shopping-list/` replaces it. When a session key is attached
//! every request carries `Authorization: Token <key>`.

use crate::auth::Session;
use crate::config::ApiConfig;
use crate::errors::AppError;
use crate::storage::{ListRecord, ListStore};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

pub struct RemoteStore {
    client: Client,
    base_url: String,
    key: Option<String>,
}

impl RemoteStore {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key: None,
        })
    }

    fn list_url(&self) -> String {
        format!("{}/shopping-list/", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.key {
            Some(key) => request.header("Authorization", format!("Token {}", key)),
            None => request,
        }
    }
}

#[async_trait]
impl ListStore for RemoteStore {
    async fn load(&self) -> Result<Vec<ListRecord>, AppError> {
        let url = self.list_url();
        let resp = self.authorize(self.client.get(&url)).send().await?;

        if !resp.status().is_success() {
            let error = format!("GET {} returned {}", url, resp.status());
            log::error!("{}", error);
            return Err(AppError::Http(error));
        }

        let records = resp.json::<Vec<ListRecord>>().await.map_err(|e| {
            AppError::Storage(format!("Failed to parse shopping list from {}: {}", url, e))
        })?;
        log::debug!("Fetched {} items from {}", records.len(), url);
        Ok(records)
    }

    async fn save(&self, records: &[ListRecord]) -> Result<(), AppError> {
        let url = self.list_url();
        let resp = self
            .authorize(self.client.put(&url))
            .json(records)
            .send()
            .await?;

        if !resp.status().is_success() {
            let error = format!("PUT {} returned {}", url, resp.status());
            log::error!("{}", error);
            return Err(AppError::Http(error));
        }
        log::debug!("Stored {} items at {}", records.len(), url);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("remote API {}", self.base_url)
    }

    fn attach_session(&mut self, session: &Session) {
        self.key = session.key.clone();
    }
}
