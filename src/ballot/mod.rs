pub mod positions;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{EligibilityService, VoteService};
use crate::error::{BallotError, ServiceError};
use crate::models::{PositionKey, Vote, VoteCreate, VoterEligibility, VotingMethod};
use crate::voting::{self, Selection};

/// The result of a fully successful position submission.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    pub votes: Vec<Vote>,
    /// The snapshot fetched after the last vote was accepted.
    pub eligibility: VoterEligibility,
}

/// Where a sequential submission stopped.
#[derive(Debug)]
pub struct SequenceFailure {
    /// Votes the server accepted before the failure, in submission order.
    pub accepted: Vec<Vote>,
    /// Index into the submitted records of the one that failed.
    pub failed_index: usize,
    pub source: ServiceError,
}

/// Submit `records` one at a time, each awaited before the next is sent.
/// Stops at the first failure; nothing after it is sent.
pub async fn submit_sequence<V>(
    service: &V,
    election_id: &str,
    records: &[VoteCreate],
) -> Result<Vec<Vote>, SequenceFailure>
where
    V: VoteService + ?Sized,
{
    let mut accepted = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match service.cast_vote(election_id, record).await {
            Ok(vote) => accepted.push(vote),
            Err(source) => {
                // Abort: later records are never sent
                return Err(SequenceFailure {
                    accepted,
                    failed_index: index,
                    source,
                });
            }
        }
    }
    Ok(accepted)
}

/// Turns one position's selection into vote calls and reloads eligibility afterwards.
pub struct BallotSubmissionEngine<V: ?Sized, E: ?Sized> {
    votes: Arc<V>,
    eligibility: Arc<E>,
}

impl<V, E> BallotSubmissionEngine<V, E>
where
    V: VoteService + ?Sized,
    E: EligibilityService + ?Sized,
{
    pub fn new(votes: Arc<V>, eligibility: Arc<E>) -> Self {
        Self { votes, eligibility }
    }

    /// Validate, submit every record in order, then fetch a fresh eligibility
    /// snapshot. The caller decides what to do with the selection afterwards.
    pub async fn submit_position(
        &self,
        election_id: &str,
        position: &PositionKey,
        method: VotingMethod,
        selection: Option<&Selection>,
    ) -> Result<SubmitReceipt, BallotError> {
        // Validation failures return before any network call
        let records = voting::build_votes(method, election_id, position, selection)?;

        let attempt = Uuid::new_v4();
        info!(
            "[{}] Submitting {} vote(s) for election {} position {} ({})",
            attempt,
            records.len(),
            election_id,
            position,
            method
        );

        let votes = match submit_sequence(&*self.votes, election_id, &records).await {
            Ok(votes) => votes,
            Err(failure) => {
                let failed = &records[failure.failed_index];
                error!(
                    "[{}] Vote {} of {} (candidate {}) failed, {} recorded, {} not sent: {}",
                    attempt,
                    failure.failed_index + 1,
                    records.len(),
                    failed.candidate_id,
                    failure.accepted.len(),
                    records.len() - failure.failed_index - 1,
                    failure.source
                );
                return Err(BallotError::Submission {
                    candidate_id: failed.candidate_id.clone(),
                    attempted: failure.failed_index + 1,
                    total: records.len(),
                    source: failure.source,
                });
            }
        };

        // Every vote is in; reload the snapshot
        match self.eligibility.check_eligibility(election_id).await {
            Ok(eligibility) => {
                let overlap = eligibility.overlapping_positions();
                if !overlap.is_empty() {
                    warn!(
                        "[{}] Eligibility for election {} lists {:?} as both voted and remaining",
                        attempt, election_id, overlap
                    );
                }
                info!("[{}] Recorded {} vote(s) for position {}", attempt, votes.len(), position);
                Ok(SubmitReceipt { votes, eligibility })
            }
            Err(source) => {
                warn!(
                    "[{}] Votes recorded for position {} but eligibility refresh failed: {}",
                    attempt, position, source
                );
                Err(BallotError::Refresh { votes, source })
            }
        }
    }
}
