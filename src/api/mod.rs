//! Boundaries to the intranet API. The ballot engine only sees these traits;
//! [`ApiClient`] is the HTTP implementation.

mod client;

pub use client::ApiClient;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::models::{Candidate, Election, Vote, VoteCreate, VoterEligibility};

#[async_trait]
pub trait ElectionService: Send + Sync {
    async fn get_election(&self, election_id: &str) -> Result<Election, ServiceError>;
}

#[async_trait]
pub trait CandidateService: Send + Sync {
    async fn get_candidates(&self, election_id: &str) -> Result<Vec<Candidate>, ServiceError>;
}

#[async_trait]
pub trait EligibilityService: Send + Sync {
    async fn check_eligibility(&self, election_id: &str) -> Result<VoterEligibility, ServiceError>;
}

/// Accepts one candidate-vote per call.
#[async_trait]
pub trait VoteService: Send + Sync {
    async fn cast_vote(&self, election_id: &str, vote: &VoteCreate) -> Result<Vote, ServiceError>;
}

/// Everything a ballot session needs from the server.
pub trait BallotApi: ElectionService + CandidateService + EligibilityService + VoteService {}

impl<T> BallotApi for T where T: ElectionService + CandidateService + EligibilityService + VoteService {}
