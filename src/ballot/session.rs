use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::positions::{self, PositionBallot};
use super::{BallotSubmissionEngine, SubmitReceipt};
use crate::api::BallotApi;
use crate::error::BallotError;
use crate::models::{Candidate, Election, PositionKey, VoterEligibility};
use crate::voting::{BallotSelections, Selection};

/// One voter's open ballot for one election.
///
/// Holds the only mutable state of a voting session: the selections, the last
/// eligibility snapshot, and the message shown next to each position. `submit`
/// takes `&mut self`, so a session never has two submissions in flight.
pub struct BallotSession<A: BallotApi> {
    api: Arc<A>,
    engine: BallotSubmissionEngine<A, A>,
    election: Election,
    candidates: Vec<Candidate>,
    eligibility: VoterEligibility,
    selections: BallotSelections,
    notices: HashMap<PositionKey, String>,
    stale: bool,
}

impl<A: BallotApi> BallotSession<A> {
    /// Fetch the election, its accepted candidates, and the voter's eligibility.
    pub async fn load(api: Arc<A>, election_id: &str) -> Result<Self, BallotError> {
        let election = api.get_election(election_id).await?;
        let candidates: Vec<Candidate> = api
            .get_candidates(election_id)
            .await?
            .into_iter()
            .filter(|c| c.accepted)
            .collect();
        let eligibility = api.check_eligibility(election_id).await?;

        info!(
            "Loaded ballot for election {} ({}, {} position(s), {} candidate(s), eligible={})",
            election.id,
            election.voting_method,
            election.positions.len().max(1),
            candidates.len(),
            eligibility.is_eligible
        );

        Ok(Self {
            engine: BallotSubmissionEngine::new(Arc::clone(&api), Arc::clone(&api)),
            api,
            selections: BallotSelections::new(election.voting_method),
            election,
            candidates,
            eligibility,
            notices: HashMap::new(),
            stale: false,
        })
    }

    pub fn election(&self) -> &Election {
        &self.election
    }

    pub fn eligibility(&self) -> &VoterEligibility {
        &self.eligibility
    }

    /// True after votes were recorded but the follow-up refresh failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn positions(&self) -> Vec<PositionKey> {
        positions::ballot_positions(&self.election)
    }

    pub fn candidates_for(&self, position: &PositionKey) -> Vec<&Candidate> {
        positions::candidates_for(&self.candidates, position)
    }

    pub fn has_voted(&self, position: &PositionKey) -> bool {
        positions::has_voted(&self.eligibility, position)
    }

    pub fn ballot_summary(&self) -> Vec<PositionBallot<'_>> {
        positions::position_ballots(&self.election, &self.candidates, &self.eligibility)
    }

    pub fn selection(&self, position: &PositionKey) -> Option<&Selection> {
        self.selections.get(position)
    }

    pub fn selections(&self) -> &BallotSelections {
        &self.selections
    }

    /// The message to show next to `position`, if any.
    pub fn notice(&self, position: &PositionKey) -> Option<&str> {
        self.notices.get(position).map(String::as_str)
    }

    /// Apply one voter click on a candidate.
    pub fn toggle(&mut self, position: &PositionKey, candidate_id: &str) -> Result<(), BallotError> {
        self.ensure_can_vote(position)?;
        if !self.candidates_for(position).iter().any(|c| c.id == candidate_id) {
            return Err(BallotError::UnknownCandidate {
                position: position.clone(),
                candidate_id: candidate_id.to_string(),
            });
        }

        self.selections.toggle(position, candidate_id);
        self.notices.remove(position);
        Ok(())
    }

    /// Submit the current selection for one position.
    ///
    /// On success the selection is discarded and the eligibility snapshot is
    /// replaced with the server's. On a failed vote the selection is kept so
    /// the voter can retry as is.
    pub async fn submit(&mut self, position: &PositionKey) -> Result<SubmitReceipt, BallotError> {
        if let Err(err) = self.ensure_can_vote(position) {
            self.notices.insert(position.clone(), err.user_message());
            return Err(err);
        }

        let result = self
            .engine
            .submit_position(
                &self.election.id,
                position,
                self.election.voting_method,
                self.selections.get(position),
            )
            .await;

        match &result {
            Ok(receipt) => {
                // Server snapshot wins; this position is done.
                self.eligibility = receipt.eligibility.clone();
                self.selections.clear(position);
                self.notices.remove(position);
            }
            Err(err) if err.vote_recorded() => {
                // Votes landed but the snapshot is old. Block further votes until a refresh.
                self.selections.clear(position);
                self.stale = true;
                self.notices.insert(position.clone(), err.user_message());
            }
            Err(err) => {
                // Keep the selection for a retry
                self.notices.insert(position.clone(), err.user_message());
            }
        }
        result
    }

    /// Reload the eligibility snapshot, e.g. after a failed post-vote refresh.
    pub async fn refresh_eligibility(&mut self) -> Result<&VoterEligibility, BallotError> {
        match self.api.check_eligibility(&self.election.id).await {
            Ok(eligibility) => {
                self.eligibility = eligibility;
                if self.stale {
                    info!("Eligibility for election {} is current again", self.election.id);
                    self.stale = false;
                    self.notices.clear();
                }
                Ok(&self.eligibility)
            }
            Err(source) => {
                warn!("Eligibility refresh for election {} failed: {}", self.election.id, source);
                Err(BallotError::Service(source))
            }
        }
    }

    fn ensure_can_vote(&self, position: &PositionKey) -> Result<(), BallotError> {
        if !self.eligibility.is_eligible {
            return Err(BallotError::Ineligible {
                reason: self.eligibility.reason.clone(),
            });
        }
        if self.stale {
            return Err(BallotError::StaleEligibility);
        }
        if self.has_voted(position) {
            return Err(BallotError::AlreadyVoted(position.clone()));
        }
        Ok(())
    }
}
