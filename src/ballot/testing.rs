//! In-memory stand-in for the intranet API that records every call.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::{CandidateService, ElectionService, EligibilityService, VoteService};
use crate::error::ServiceError;
use crate::models::{Candidate, Election, Vote, VoteCreate, VoterEligibility, VotingMethod};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetElection,
    GetCandidates,
    CheckEligibility,
    CastVote(VoteCreate),
}

pub struct FakeApi {
    election: Election,
    candidates: Vec<Candidate>,
    eligibility: Mutex<VoterEligibility>,
    calls: Mutex<Vec<Call>>,
    reject_candidate: Mutex<Option<(String, Option<String>)>>,
    eligibility_down: Mutex<bool>,
}

impl FakeApi {
    pub fn new(method: VotingMethod, positions: &[&str], candidates: &[(&str, Option<&str>)]) -> Self {
        let positions: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
        Self {
            election: Election {
                id: "e1".to_string(),
                title: "Officer election".to_string(),
                description: None,
                voting_method: method,
                victory_condition: None,
                runoff_type: None,
                positions: positions.clone(),
                status: Some("open".to_string()),
                start_date: None,
                end_date: None,
            },
            candidates: candidates
                .iter()
                .map(|(id, position)| Candidate {
                    id: id.to_string(),
                    election_id: Some("e1".to_string()),
                    name: format!("Candidate {id}"),
                    position: position.map(str::to_string),
                    statement: None,
                    accepted: true,
                })
                .collect(),
            eligibility: Mutex::new(VoterEligibility {
                is_eligible: true,
                has_voted: false,
                positions_voted: Vec::new(),
                positions_remaining: positions,
                reason: None,
            }),
            calls: Mutex::new(Vec::new()),
            reject_candidate: Mutex::new(None),
            eligibility_down: Mutex::new(false),
        }
    }

    pub fn with_candidate(mut self, candidate: Candidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    pub fn set_eligibility(&self, eligibility: VoterEligibility) {
        *self.eligibility.lock().unwrap() = eligibility;
    }

    /// Make every vote for `candidate_id` fail, optionally with a server message.
    pub fn reject_votes_for(&self, candidate_id: &str, message: Option<&str>) {
        *self.reject_candidate.lock().unwrap() =
            Some((candidate_id.to_string(), message.map(str::to_string)));
    }

    pub fn set_eligibility_down(&self, down: bool) {
        *self.eligibility_down.lock().unwrap() = down;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn cast_votes(&self) -> Vec<VoteCreate> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CastVote(vote) => Some(vote),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ElectionService for FakeApi {
    async fn get_election(&self, _election_id: &str) -> Result<Election, ServiceError> {
        self.record(Call::GetElection);
        Ok(self.election.clone())
    }
}

#[async_trait]
impl CandidateService for FakeApi {
    async fn get_candidates(&self, _election_id: &str) -> Result<Vec<Candidate>, ServiceError> {
        self.record(Call::GetCandidates);
        Ok(self.candidates.clone())
    }
}

#[async_trait]
impl EligibilityService for FakeApi {
    async fn check_eligibility(&self, _election_id: &str) -> Result<VoterEligibility, ServiceError> {
        self.record(Call::CheckEligibility);
        if *self.eligibility_down.lock().unwrap() {
            return Err(ServiceError::Status {
                status: 503,
                message: None,
            });
        }
        Ok(self.eligibility.lock().unwrap().clone())
    }
}

#[async_trait]
impl VoteService for FakeApi {
    async fn cast_vote(&self, election_id: &str, vote: &VoteCreate) -> Result<Vote, ServiceError> {
        self.record(Call::CastVote(vote.clone()));

        if let Some((candidate_id, message)) = self.reject_candidate.lock().unwrap().clone() {
            if candidate_id == vote.candidate_id {
                return Err(ServiceError::Status { status: 400, message });
            }
        }

        let mut eligibility = self.eligibility.lock().unwrap();
        match &vote.position {
            Some(position) => {
                eligibility.positions_remaining.retain(|p| p != position);
                if !eligibility.positions_voted.contains(position) {
                    eligibility.positions_voted.push(position.clone());
                }
            }
            None => eligibility.has_voted = true,
        }

        Ok(Vote {
            id: format!("v-{}-{}", vote.candidate_id, vote.vote_rank.unwrap_or(0)),
            election_id: election_id.to_string(),
            candidate_id: vote.candidate_id.clone(),
            position: vote.position.clone(),
            vote_rank: vote.vote_rank,
            voted_at: None,
        })
    }
}
