use crate::domain::model::{Group, MatchSet, PreferenceList};
use serde::Serialize;

/// A proposer and receiver who both prefer each other to what they ended up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockingPair {
    pub proposer: String,
    pub receiver: String,
}

/// Brute-force scan of every (proposer, receiver) pair.
///
/// Pass the groups as they were *before* matching; the run prunes lists in
/// place, and the pruned lists cannot be used to judge preferences.
pub fn find_blocking_pairs(
    proposers: &Group,
    receivers: &Group,
    matches: &MatchSet,
) -> Vec<BlockingPair> {
    let mut blocking = Vec::new();

    for proposer in proposers.iter() {
        let current = matches.receiver_for(proposer.name());
        for receiver in receivers.iter() {
            if current == Some(receiver.name()) {
                continue;
            }
            let partner = matches.proposer_for(receiver.name());
            if prefers(proposer, receiver.name(), current)
                && prefers(receiver, proposer.name(), partner)
            {
                blocking.push(BlockingPair {
                    proposer: proposer.name().to_string(),
                    receiver: receiver.name().to_string(),
                });
            }
        }
    }

    blocking
}

pub fn is_stable(proposers: &Group, receivers: &Group, matches: &MatchSet) -> bool {
    find_blocking_pairs(proposers, receivers, matches).is_empty()
}

// Unlisted candidates are unacceptable; anyone listed beats being alone.
fn prefers(agent: &PreferenceList, candidate: &str, partner: Option<&str>) -> bool {
    let Some(rank) = agent.index_of(candidate) else {
        return false;
    };
    match partner.and_then(|p| agent.index_of(p)) {
        Some(partner_rank) => rank < partner_rank,
        None => true,
    }
}
