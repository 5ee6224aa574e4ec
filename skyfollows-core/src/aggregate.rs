use crate::error::{CoreError, Stage};
use crate::pipeline::SocialGraph;
use crate::types::{FollowerIdentity, FrequencyMap};
use tracing::{debug, info};

/// Occurrence counts of followed accounts across many follow lists.
#[derive(Debug, Default, Clone)]
pub struct FollowCounter {
    counts: FrequencyMap,
}

impl FollowCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to the count of every identity in `follows`, once per occurrence.
    pub fn record<I>(&mut self, follows: I)
    where
        I: IntoIterator<Item = FollowerIdentity>,
    {
        for identity in follows {
            *self.counts.entry(identity).or_insert(0) += 1;
        }
    }

    pub fn count(&self, identity: &FollowerIdentity) -> u32 {
        self.counts.get(identity).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn into_map(self) -> FrequencyMap {
        self.counts
    }
}

/// Fetches the follows of each member in order and counts them.
///
/// Members are fetched one at a time; the first failure aborts the whole
/// aggregation.
pub async fn aggregate_follows<G>(graph: &G, members: &[String]) -> Result<FrequencyMap, CoreError>
where
    G: SocialGraph + ?Sized,
{
    let mut counter = FollowCounter::new();

    for (index, member) in members.iter().enumerate() {
        let follows = graph.follows(member).await.map_err(|e| {
            e.in_stage(Stage::FetchMemberFollows {
                member: member.clone(),
            })
        })?;

        debug!(
            "Member {}/{} {} follows {} accounts",
            index + 1,
            members.len(),
            member,
            follows.len()
        );
        counter.record(follows);
    }

    info!(
        "Aggregated follows of {} members into {} distinct accounts",
        members.len(),
        counter.len()
    );
    Ok(counter.into_map())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice(description: &str) -> FollowerIdentity {
        FollowerIdentity::new("alice", "Alice", description)
    }

    #[test]
    fn test_new_identity_starts_at_one() {
        let mut counter = FollowCounter::new();
        counter.record(vec![alice("x")]);
        assert_eq!(counter.count(&alice("x")), 1);
        assert_eq!(counter.len(), 1);
    }

    #[test]
    fn test_counts_add_across_members() {
        let mut counter = FollowCounter::new();
        // member A
        counter.record(vec![alice("x")]);
        // member B
        counter.record(vec![alice("x"), alice("x")]);

        assert_eq!(counter.count(&alice("x")), 3);
    }

    #[test]
    fn test_same_handle_different_profile_is_distinct() {
        let mut counter = FollowCounter::new();
        counter.record(vec![alice("x"), alice("y")]);
        counter.record(vec![FollowerIdentity::new("alice", "Alice B.", "x")]);

        assert_eq!(counter.len(), 3);
        assert_eq!(counter.count(&alice("x")), 1);
        assert_eq!(counter.count(&alice("y")), 1);
    }

    #[test]
    fn test_empty_input() {
        let mut counter = FollowCounter::new();
        counter.record(Vec::new());
        assert!(counter.is_empty());
        assert!(counter.into_map().is_empty());
    }
}
