pub mod approval;
pub mod plurality;
pub mod ranked;

use crate::error::ValidationError;
use crate::models::{PositionKey, VoteCreate, VotingMethod};
use std::collections::HashMap;

/// A voter's in-progress choice for one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Simple majority and supermajority.
    Single(String),
    /// Candidate ids in preference order, first entry is rank 1.
    Ranked(Vec<String>),
    /// Approved candidate ids in the order they were approved.
    Approved(Vec<String>),
}

impl Selection {
    pub fn candidate_ids(&self) -> &[String] {
        match self {
            Selection::Single(id) => std::slice::from_ref(id),
            Selection::Ranked(ids) | Selection::Approved(ids) => ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidate_ids().is_empty()
    }
}

/// All of a voter's selections for one election, keyed by position.
///
/// Bound to the election's voting method so every stored selection has the
/// matching shape.
#[derive(Debug, Clone)]
pub struct BallotSelections {
    method: VotingMethod,
    by_position: HashMap<PositionKey, Selection>,
}

impl BallotSelections {
    pub fn new(method: VotingMethod) -> Self {
        Self {
            method,
            by_position: HashMap::new(),
        }
    }

    pub fn method(&self) -> VotingMethod {
        self.method
    }

    /// Apply one voter click on `candidate_id` for `position`.
    pub fn toggle(&mut self, position: &PositionKey, candidate_id: &str) {
        let current = self.by_position.remove(position);
        let next = match self.method {
            VotingMethod::SimpleMajority | VotingMethod::Supermajority => {
                plurality::toggle(current, candidate_id)
            }
            VotingMethod::RankedChoice => ranked::toggle(current, candidate_id),
            VotingMethod::Approval => approval::toggle(current, candidate_id),
        };
        // Empty selections are dropped so `get` never returns one
        if let Some(selection) = next.filter(|s| !s.is_empty()) {
            self.by_position.insert(position.clone(), selection);
        }
    }

    pub fn get(&self, position: &PositionKey) -> Option<&Selection> {
        self.by_position.get(position)
    }

    pub fn clear(&mut self, position: &PositionKey) {
        self.by_position.remove(position);
    }

    pub fn is_empty(&self, position: &PositionKey) -> bool {
        self.get(position).map_or(true, Selection::is_empty)
    }

    pub fn is_selected(&self, position: &PositionKey, candidate_id: &str) -> bool {
        self.get(position)
            .is_some_and(|s| s.candidate_ids().iter().any(|id| id == candidate_id))
    }

    /// 1-based rank of a candidate; only ranked-choice selections carry ranks.
    pub fn rank_of(&self, position: &PositionKey, candidate_id: &str) -> Option<u32> {
        match self.get(position)? {
            Selection::Ranked(ids) => ranked::rank_of(ids, candidate_id),
            _ => None,
        }
    }
}

/// Turn the selection for one position into the vote records to submit, in
/// submission order. Fails without side effects when the selection is
/// missing or does not fit the voting method.
pub fn build_votes(
    method: VotingMethod,
    election_id: &str,
    position: &PositionKey,
    selection: Option<&Selection>,
) -> Result<Vec<VoteCreate>, ValidationError> {
    // The default position goes out without a position field
    let position = position.wire();
    match method {
        VotingMethod::SimpleMajority | VotingMethod::Supermajority => {
            plurality::build_votes(election_id, position, selection)
        }
        VotingMethod::RankedChoice => ranked::build_votes(election_id, position, selection),
        VotingMethod::Approval => approval::build_votes(election_id, position, selection),
    }
}
