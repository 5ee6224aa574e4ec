use crate::metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use skyfollows_core::{BlueskyApiError, CoreError, FollowerIdentity, ListDescriptor, Page};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub const RESOLVE_HANDLE_ENDPOINT: &str = "com.atproto.identity.resolveHandle";
pub const CREATE_SESSION_ENDPOINT: &str = "com.atproto.server.createSession";
pub const GET_LISTS_ENDPOINT: &str = "app.bsky.graph.getLists";
pub const GET_LIST_ENDPOINT: &str = "app.bsky.graph.getList";
pub const GET_FOLLOWS_ENDPOINT: &str = "app.bsky.graph.getFollows";

/// Largest page size the graph endpoints accept.
pub const PAGE_LIMIT: &str = "100";

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveHandleResponse {
    pub did: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub access_jwt: String,
    pub handle: String,
    pub did: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetListsResponse {
    pub lists: Vec<ListView>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListView {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetListResponse {
    pub items: Vec<ListItemView>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListItemView {
    pub subject: ProfileView,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetFollowsResponse {
    pub follows: Vec<ProfileView>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub handle: String,
    #[serde(default)]
    pub did: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of a non-2xx XRPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct XrpcErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct BlueskyApiClient {
    http_client: Client,
    metrics: Arc<MetricsCollector>,
    base_url: String,
    user_agent: String,
    access_jwt: Option<String>,
}

impl BlueskyApiClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            metrics: Arc::new(MetricsCollector::new()),
            base_url: base_url.to_string(),
            user_agent: user_agent.to_string(),
            access_jwt: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_jwt.is_some()
    }

    /// Sends subsequent requests to `base_url` with a bearer token.
    pub fn set_session(&mut self, base_url: &str, access_jwt: String) {
        self.base_url = base_url.to_string();
        self.access_jwt = Some(access_jwt);
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let builder = self
            .http_client
            .request(method, url)
            .header("Accept", "application/json");

        match &self.access_jwt {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        request_builder: RequestBuilder,
    ) -> Result<Response, CoreError> {
        let start_time = Instant::now();

        info!("Making Bluesky API request: {} {}", method, endpoint);
        let result = request_builder.send().await;

        let status_code = result.as_ref().ok().map(|r| r.status().as_u16());
        let success = result
            .as_ref()
            .map(|r| r.status().is_success())
            .unwrap_or(false);
        self.metrics
            .record_request(RequestMetrics {
                endpoint: endpoint.to_string(),
                method: method.to_string(),
                status_code,
                response_time: start_time.elapsed(),
                success,
            })
            .await;

        let response = result.map_err(|e| {
            error!("Network error for {} {}: {}", method, endpoint, e);
            CoreError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        let body = response.json::<XrpcErrorBody>().await.ok();
        Err(CoreError::BlueskyApi(status_error(endpoint, status, body)))
    }

    async fn get_json<T>(&self, endpoint: &str, query_params: &[(&str, &str)]) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, endpoint).query(query_params);
        let response = self.execute(Method::GET, endpoint, builder).await?;
        decode(endpoint, response).await
    }

    pub async fn create_session(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<SessionData, CoreError> {
        let builder = self
            .request(Method::POST, CREATE_SESSION_ENDPOINT)
            .json(&CreateSessionRequest {
                identifier,
                password,
            });

        let response = self
            .execute(Method::POST, CREATE_SESSION_ENDPOINT, builder)
            .await
            .map_err(|e| match e {
                CoreError::BlueskyApi(BlueskyApiError::InvalidToken)
                | CoreError::BlueskyApi(BlueskyApiError::BadRequest { .. }) => {
                    CoreError::BlueskyApi(BlueskyApiError::AuthenticationFailed {
                        reason: e.to_string(),
                    })
                }
                other => other,
            })?;

        let session: SessionData = decode(CREATE_SESSION_ENDPOINT, response).await?;
        info!("Created session for {}", session.handle);
        Ok(session)
    }

    pub async fn resolve_handle(&self, handle: &str) -> Result<String, CoreError> {
        let response: ResolveHandleResponse = self
            .get_json(RESOLVE_HANDLE_ENDPOINT, &[("handle", handle)])
            .await?;
        Ok(response.did)
    }

    pub async fn get_lists_page(
        &self,
        actor: &str,
        cursor: Option<String>,
    ) -> Result<Page<ListDescriptor>, CoreError> {
        let params = page_params("actor", actor, cursor.as_deref());
        let response: GetListsResponse = self.get_json(GET_LISTS_ENDPOINT, &params).await?;

        let lists = response
            .lists
            .into_iter()
            .map(|list| ListDescriptor {
                name: list.name,
                uri: list.uri,
            })
            .collect();
        Ok(Page::new(lists, response.cursor))
    }

    /// One page of a list's members, as handles.
    pub async fn get_list_page(
        &self,
        list_uri: &str,
        cursor: Option<String>,
    ) -> Result<Page<String>, CoreError> {
        let params = page_params("list", list_uri, cursor.as_deref());
        let response: GetListResponse = self.get_json(GET_LIST_ENDPOINT, &params).await?;

        let handles = response
            .items
            .into_iter()
            .map(|item| item.subject.handle)
            .collect();
        Ok(Page::new(handles, response.cursor))
    }

    pub async fn get_follows_page(
        &self,
        actor: &str,
        cursor: Option<String>,
    ) -> Result<Page<FollowerIdentity>, CoreError> {
        let params = page_params("actor", actor, cursor.as_deref());
        let response: GetFollowsResponse = self.get_json(GET_FOLLOWS_ENDPOINT, &params).await?;

        let follows = response.follows.into_iter().map(Into::into).collect();
        Ok(Page::new(follows, response.cursor))
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.get_metrics().await
    }
}

fn page_params<'a>(
    key: &'a str,
    value: &'a str,
    cursor: Option<&'a str>,
) -> Vec<(&'a str, &'a str)> {
    let mut params = Vec::with_capacity(3);
    params.push((key, value));
    params.push(("limit", PAGE_LIMIT));
    if let Some(cursor) = cursor {
        params.push(("cursor", cursor));
    }
    params
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, CoreError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Failed to parse {} response: {}", endpoint, e);
        CoreError::BlueskyApi(BlueskyApiError::InvalidResponse {
            details: format!("Failed to parse {} response: {}", endpoint, e),
        })
    })
}

fn status_error(endpoint: &str, status: StatusCode, body: Option<XrpcErrorBody>) -> BlueskyApiError {
    let message = body
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| status.to_string());

    match status.as_u16() {
        400 => BlueskyApiError::BadRequest {
            endpoint: endpoint.to_string(),
            message,
        },
        401 => BlueskyApiError::InvalidToken,
        403 => BlueskyApiError::Forbidden {
            resource: endpoint.to_string(),
        },
        404 => BlueskyApiError::NotFound {
            resource: endpoint.to_string(),
        },
        code if status.is_server_error() => BlueskyApiError::ServerError { status_code: code },
        code => BlueskyApiError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            status_code: code,
        },
    }
}

impl From<ProfileView> for FollowerIdentity {
    fn from(profile: ProfileView) -> Self {
        Self {
            handle: profile.handle,
            display_name: profile.display_name.unwrap_or_default(),
            description: profile.description.unwrap_or_default(),
        }
    }
}
