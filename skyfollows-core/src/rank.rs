use crate::types::{FrequencyMap, RankedEntry};

/// Orders entries by count, highest first.
///
/// There is no secondary key: entries with equal counts come out in
/// whatever order the map yields them.
pub fn rank(counts: FrequencyMap) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = counts
        .into_iter()
        .map(|(identity, count)| RankedEntry { identity, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}
