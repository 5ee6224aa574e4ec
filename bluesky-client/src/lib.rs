pub mod api;
pub mod metrics;


use api::{
    BlueskyApiClient, GET_FOLLOWS_ENDPOINT, GET_LISTS_ENDPOINT, GET_LIST_ENDPOINT,
};
use async_trait::async_trait;
use skyfollows_core::{
    fetch_all, AppConfig, CoreError, FollowerIdentity, ListDescriptor, PaginationOptions,
    SocialGraph,
};
use std::time::Duration;
use tracing::info;

/// Bluesky graph access with complete, cursor-walked collections.
#[derive(Debug)]
pub struct BlueskyClient {
    api: BlueskyApiClient,
    auth_base_url: String,
    timeout: Duration,
    pagination: PaginationOptions,
}

impl BlueskyClient {
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let api = BlueskyApiClient::new(&config.api_base_url, &config.user_agent, timeout)?;

        Ok(Self {
            api,
            auth_base_url: config.auth_base_url.clone(),
            timeout,
            pagination: config.pagination(),
        })
    }

    /// Creates a session with an app password. Later requests go to the
    /// auth service with the session's access token.
    pub async fn login(&mut self, identifier: &str, password: &str) -> Result<(), CoreError> {
        let auth = BlueskyApiClient::new(&self.auth_base_url, self.api.user_agent(), self.timeout)?;
        let session = auth.create_session(identifier, password).await?;

        self.api.set_session(&self.auth_base_url, session.access_jwt);
        info!("Authenticated as {} ({})", session.handle, session.did);
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.is_authenticated()
    }

    pub async fn get_api_metrics(&self) -> metrics::ApiMetrics {
        self.api.get_metrics().await
    }
}

#[async_trait]
impl SocialGraph for BlueskyClient {
    async fn resolve_handle(&self, handle: &str) -> Result<String, CoreError> {
        self.api.resolve_handle(handle).await
    }

    async fn lists(&self, actor: &str) -> Result<Vec<ListDescriptor>, CoreError> {
        let api = &self.api;
        fetch_all(GET_LISTS_ENDPOINT, self.pagination, |cursor| {
            api.get_lists_page(actor, cursor)
        })
        .await
    }

    async fn list_members(&self, list_uri: &str) -> Result<Vec<String>, CoreError> {
        let api = &self.api;
        fetch_all(GET_LIST_ENDPOINT, self.pagination, |cursor| {
            api.get_list_page(list_uri, cursor)
        })
        .await
    }

    async fn follows(&self, actor: &str) -> Result<Vec<FollowerIdentity>, CoreError> {
        let api = &self.api;
        fetch_all(GET_FOLLOWS_ENDPOINT, self.pagination, |cursor| {
            api.get_follows_page(actor, cursor)
        })
        .await
    }
}
