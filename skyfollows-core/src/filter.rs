use crate::config::{DEFAULT_ACCOUNT, DEFAULT_MIN_COUNT};
use crate::types::{FollowerIdentity, FrequencyMap};
use std::collections::HashSet;
use tracing::debug;

/// Exclusion rules applied to aggregated follow counts.
///
/// An entry is dropped when any rule matches. Every rule looks at the
/// entry's original count and handle, so the outcome is independent of the
/// order the rules are listed in.
#[derive(Debug, Clone)]
pub struct FollowFilter {
    min_count: u32,
    list_members: HashSet<String>,
    user_follows: HashSet<String>,
    default_accounts: HashSet<String>,
}

impl FollowFilter {
    pub fn new(min_count: u32) -> Self {
        Self {
            min_count,
            list_members: HashSet::new(),
            user_follows: HashSet::new(),
            default_accounts: HashSet::from([DEFAULT_ACCOUNT.to_string()]),
        }
    }

    /// Handles already curated in the list; compared case-insensitively.
    pub fn with_list_members<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.list_members = handles
            .into_iter()
            .map(|h| h.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Accounts the requesting user already follows; compared case-insensitively.
    pub fn with_user_follows<'a, I>(mut self, follows: I) -> Self
    where
        I: IntoIterator<Item = &'a FollowerIdentity>,
    {
        self.user_follows = follows
            .into_iter()
            .map(|f| f.handle.to_lowercase())
            .collect();
        self
    }

    /// Replaces the reserved platform accounts; compared exactly.
    pub fn with_default_accounts<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_accounts = handles.into_iter().map(Into::into).collect();
        self
    }

    pub fn excludes(&self, identity: &FollowerIdentity, count: u32) -> bool {
        let handle = identity.handle.to_lowercase();
        count <= self.min_count
            || self.list_members.contains(&handle)
            || self.user_follows.contains(&handle)
            || self.default_accounts.contains(&identity.handle)
    }

    /// Copies the entries no rule excludes into a new map.
    pub fn apply(&self, counts: &FrequencyMap) -> FrequencyMap {
        let kept: FrequencyMap = counts
            .iter()
            .filter(|(identity, count)| !self.excludes(identity, **count))
            .map(|(identity, count)| (identity.clone(), *count))
            .collect();

        debug!(
            "Filter kept {} of {} accounts (min count {})",
            kept.len(),
            counts.len(),
            self.min_count
        );
        kept
    }
}

impl Default for FollowFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_COUNT)
    }
}
