//! Deferred acceptance with preference-list pruning.
//!
//! Each proposer goes to the first receiver it can still reach. The
//! receiver always accepts, then cuts every suitor it ranks below the new
//! partner out of its list (and itself out of theirs). After that, anyone
//! who can still reach the receiver ranks above its current partner, so the
//! receiver never has to compare ranks when a new proposal arrives.
//!
//! A displaced proposer is pushed on a stack and proposes again before the
//! next top-level proposer is taken, which matches the depth-first order of
//! a recursive re-proposal.

use crate::domain::model::{Group, MatchSet};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub proposals: usize,
    pub displacements: usize,
    pub exhausted: usize,
    pub pruned: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    Accepted {
        proposer: String,
        receiver: String,
        displaced: Option<String>,
    },
    /// The proposer ran out of reachable candidates and stays unmatched.
    Exhausted { proposer: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matches: MatchSet,
    pub stats: MatchStats,
}

pub struct Matcher<'a> {
    proposers: &'a mut Group,
    receivers: &'a mut Group,
    matches: MatchSet,
    displaced: Vec<usize>,
    next_proposer: usize,
    stats: MatchStats,
}

impl<'a> Matcher<'a> {
    pub fn new(proposers: &'a mut Group, receivers: &'a mut Group) -> Self {
        Self {
            proposers,
            receivers,
            matches: MatchSet::new(),
            displaced: Vec::new(),
            next_proposer: 0,
            stats: MatchStats::default(),
        }
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn proposers(&self) -> &Group {
        self.proposers
    }

    pub fn receivers(&self) -> &Group {
        self.receivers
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub fn is_finished(&self) -> bool {
        self.displaced.is_empty() && self.next_proposer >= self.proposers.len()
    }

    /// Processes one proposal: a pending displaced proposer if there is one,
    /// otherwise the next proposer in group order.
    pub fn step(&mut self) -> Option<Proposal> {
        let proposer = match self.displaced.pop() {
            Some(index) => index,
            None if self.next_proposer < self.proposers.len() => {
                self.next_proposer += 1;
                self.next_proposer - 1
            }
            None => return None,
        };
        Some(self.propose(proposer))
    }

    pub fn run(mut self) -> MatchOutcome {
        while self.step().is_some() {}

        tracing::debug!(
            "Matching finished: {} proposals, {} displacements, {} pruned entries",
            self.stats.proposals,
            self.stats.displacements,
            self.stats.pruned
        );

        MatchOutcome {
            matches: self.matches,
            stats: self.stats,
        }
    }

    fn propose(&mut self, proposer: usize) -> Proposal {
        self.stats.proposals += 1;
        let proposer_name = self.proposers.members[proposer].name().to_string();

        let Some(target) = self.first_reachable(proposer) else {
            tracing::debug!("{} has no reachable candidates left", proposer_name);
            self.stats.exhausted += 1;
            return Proposal::Exhausted {
                proposer: proposer_name,
            };
        };
        let target_name = self.receivers.members[target].name().to_string();

        let displaced = self.matches.remove(&target_name);
        self.matches.insert(target_name.clone(), proposer_name.clone());
        tracing::debug!("{} -> {}", proposer_name, target_name);

        self.prune_below(target, &proposer_name);

        match &displaced {
            // A repeated name never displaces itself.
            Some(loser) if *loser == proposer_name => {
                tracing::warn!("{} proposed to {} twice, keeping one match", loser, target_name);
            }
            Some(loser) => {
                self.stats.displacements += 1;
                tracing::debug!("{} displaced from {}", loser, target_name);
                match self.proposers.find_by_name(loser) {
                    Some(index) => self.displaced.push(index),
                    None => {
                        tracing::warn!("Displaced proposer {} is not in the proposer group", loser)
                    }
                }
            }
            None => {}
        }

        Proposal::Accepted {
            proposer: proposer_name,
            receiver: target_name,
            displaced,
        }
    }

    /// Index of the first receiver on the proposer's list that exists and
    /// lists the proposer back. Candidates failing either test are pruned.
    fn first_reachable(&mut self, proposer: usize) -> Option<usize> {
        let list = &mut self.proposers.members[proposer];

        while let Some(candidate) = list.list().first().cloned() {
            match self.receivers.find_by_name(&candidate) {
                Some(target) if self.receivers.members[target].contains(list.name()) => {
                    return Some(target);
                }
                Some(_) => {
                    tracing::debug!("{} is not acceptable to {}", list.name(), candidate);
                }
                None => {
                    tracing::debug!(
                        "{} is not a receiver, dropping it for {}",
                        candidate,
                        list.name()
                    );
                }
            }
            list.remove(&candidate);
            self.stats.pruned += 1;
        }
        None
    }

    /// Walks the target's list from the bottom up to, but not including,
    /// the accepted proposer, severing every pairing below it.
    fn prune_below(&mut self, target: usize, accepted: &str) {
        let receiver = &mut self.receivers.members[target];
        let cutoff = receiver.index_of(accepted).map_or(0, |i| i + 1);
        let below: Vec<String> = receiver.list()[cutoff..].iter().rev().cloned().collect();

        for suitor in below {
            let Some(index) = self.proposers.find_by_name(&suitor) else {
                continue;
            };
            if self.proposers.members[index].remove(receiver.name()) {
                self.stats.pruned += 1;
            }
            if receiver.remove(&suitor) {
                self.stats.pruned += 1;
            }
            tracing::debug!("{} pruned {}", receiver.name(), suitor);
        }
    }
}

/// Matches every proposer in group order and returns receiver -> proposer.
///
/// Both groups' preference lists are pruned in place as a side effect.
pub fn run(proposers: &mut Group, receivers: &mut Group) -> MatchSet {
    Matcher::new(proposers, receivers).run().matches
}
