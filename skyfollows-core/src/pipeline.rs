//! End-to-end recommendation run over a social graph.

use crate::aggregate::aggregate_follows;
use crate::config::AppConfig;
use crate::error::{CoreError, Stage};
use crate::filter::FollowFilter;
use crate::rank::rank;
use crate::types::{FollowerIdentity, ListDescriptor, RankedEntry};
use async_trait::async_trait;
use tracing::info;

/// Read access to the follow graph. Collection calls return complete,
/// already-paginated results.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Maps a handle to its stable actor identifier.
    async fn resolve_handle(&self, handle: &str) -> Result<String, CoreError>;

    async fn lists(&self, actor: &str) -> Result<Vec<ListDescriptor>, CoreError>;

    /// Handles of the accounts in a list.
    async fn list_members(&self, list_uri: &str) -> Result<Vec<String>, CoreError>;

    /// Accounts `actor` follows.
    async fn follows(&self, actor: &str) -> Result<Vec<FollowerIdentity>, CoreError>;
}

#[derive(Debug, Clone)]
pub struct RecommendRequest {
    pub username: String,
    /// `None` only enumerates the user's lists.
    pub list_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Lists(Vec<ListDescriptor>),
    Report {
        list: ListDescriptor,
        entries: Vec<RankedEntry>,
    },
}

pub struct Recommender<'a, G: ?Sized> {
    graph: &'a G,
    min_count: u32,
    default_accounts: Vec<String>,
}

impl<'a, G> Recommender<'a, G>
where
    G: SocialGraph + ?Sized,
{
    pub fn new(graph: &'a G, config: &AppConfig) -> Self {
        Self {
            graph,
            min_count: config.min_count,
            default_accounts: config.default_accounts.clone(),
        }
    }

    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = min_count;
        self
    }

    pub async fn run(&self, request: &RecommendRequest) -> Result<Outcome, CoreError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "username must not be empty".to_string(),
            });
        }

        let actor = self.graph.resolve_handle(username).await.map_err(|e| {
            e.in_stage(Stage::ResolveHandle {
                handle: username.to_string(),
            })
        })?;
        info!("Resolved {} to {}", username, actor);

        let lists = self.graph.lists(&actor).await.map_err(|e| {
            e.in_stage(Stage::FetchLists {
                actor: actor.clone(),
            })
        })?;
        info!("{} has {} lists", username, lists.len());

        let Some(list_name) = request.list_name.as_deref() else {
            return Ok(Outcome::Lists(lists));
        };

        let list = select_list(&lists, list_name)
            .map_err(|e| {
                e.in_stage(Stage::SelectList {
                    name: list_name.to_string(),
                })
            })?
            .clone();

        let members = self.graph.list_members(&list.uri).await.map_err(|e| {
            e.in_stage(Stage::FetchListMembers {
                list: list.name.clone(),
            })
        })?;
        info!("List {} has {} members", list.name, members.len());

        let counts = aggregate_follows(self.graph, &members).await?;

        let user_follows = self.graph.follows(&actor).await.map_err(|e| {
            e.in_stage(Stage::FetchUserFollows {
                actor: username.to_string(),
            })
        })?;
        info!("{} follows {} accounts", username, user_follows.len());

        let filter = FollowFilter::new(self.min_count)
            .with_list_members(&members)
            .with_user_follows(&user_follows)
            .with_default_accounts(self.default_accounts.iter().cloned());
        let entries = rank(filter.apply(&counts));
        info!("Recommending {} accounts", entries.len());

        Ok(Outcome::Report { list, entries })
    }
}

/// Picks the first list whose name matches `name`, ignoring case.
pub fn select_list<'l>(
    lists: &'l [ListDescriptor],
    name: &str,
) -> Result<&'l ListDescriptor, CoreError> {
    let wanted = name.to_lowercase();
    lists
        .iter()
        .find(|list| list.name.to_lowercase() == wanted)
        .ok_or_else(|| CoreError::ListNotFound {
            name: name.to_string(),
        })
}
