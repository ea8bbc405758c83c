use crate::models::{Candidate, Election, PositionKey, VoterEligibility};

/// One position's slice of the ballot, ready to render.
#[derive(Debug, Clone)]
pub struct PositionBallot<'a> {
    pub position: PositionKey,
    pub candidates: Vec<&'a Candidate>,
    pub already_voted: bool,
}

/// The election's positions in configured order, or the single default position.
pub fn ballot_positions(election: &Election) -> Vec<PositionKey> {
    if election.positions.is_empty() {
        vec![PositionKey::Default]
    } else {
        election
            .positions
            .iter()
            .map(|name| PositionKey::from_token(name))
            .collect()
    }
}

/// Accepted candidates standing for `position`. The default position takes
/// every accepted candidate.
pub fn candidates_for<'a>(candidates: &'a [Candidate], position: &PositionKey) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| c.accepted)
        .filter(|c| match position {
            PositionKey::Default => true,
            PositionKey::Named(name) => c.position.as_deref() == Some(name.as_str()),
        })
        .collect()
}

pub fn has_voted(eligibility: &VoterEligibility, position: &PositionKey) -> bool {
    match position {
        PositionKey::Default => eligibility.has_voted,
        PositionKey::Named(name) => eligibility.positions_voted.iter().any(|p| p == name),
    }
}

pub fn position_ballots<'a>(
    election: &Election,
    candidates: &'a [Candidate],
    eligibility: &VoterEligibility,
) -> Vec<PositionBallot<'a>> {
    ballot_positions(election)
        .into_iter()
        .map(|position| PositionBallot {
            candidates: candidates_for(candidates, &position),
            already_voted: has_voted(eligibility, &position),
            position,
        })
        .collect()
}
