use thiserror::Error;

use crate::models::{PositionKey, Vote, VotingMethod};

/// Shown when the vote endpoint fails without a message of its own.
pub const GENERIC_VOTE_FAILURE: &str = "Failed to cast vote";

/// A selection that cannot be submitted for the election's voting method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a candidate")]
    NoCandidateSelected,
    #[error("Please rank at least one candidate")]
    NothingRanked,
    #[error("Please approve at least one candidate")]
    NothingApproved,
}

/// A failed call to one of the intranet API endpoints.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("server responded with {status}{}", detail(.message))]
    Status { status: u16, message: Option<String> },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

fn joined(items: &[String]) -> String {
    items.join(", ")
}

impl ServiceError {
    /// The error text supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum BallotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A vote record was rejected; the records after it were never sent.
    #[error("vote {attempted} of {total} (candidate {candidate_id}) failed: {source}")]
    Submission {
        candidate_id: String,
        attempted: usize,
        total: usize,
        #[source]
        source: ServiceError,
    },

    /// Every vote was recorded but the eligibility snapshot could not be reloaded.
    #[error("votes recorded but eligibility refresh failed: {source}")]
    Refresh {
        votes: Vec<Vote>,
        #[source]
        source: ServiceError,
    },

    #[error("voter is not eligible{}", detail(.reason))]
    Ineligible { reason: Option<String> },

    #[error("already voted for position {0}")]
    AlreadyVoted(PositionKey),

    #[error("candidate {candidate_id} is not on the ballot for position {position}")]
    UnknownCandidate {
        position: PositionKey,
        candidate_id: String,
    },

    #[error("ballot status is out of date")]
    StaleEligibility,

    #[error("{method} takes one candidate per position, got {given}")]
    TooManyChoices { method: VotingMethod, given: usize },

    #[error("no position named {0} on this ballot")]
    UnknownPosition(String),

    #[error("election has several positions ({}), pick one", joined(.0))]
    PositionRequired(Vec<String>),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl BallotError {
    /// The single message shown to the voter for this error.
    pub fn user_message(&self) -> String {
        match self {
            BallotError::Validation(e) => e.to_string(),
            BallotError::Submission { source, .. } => source
                .server_message()
                .unwrap_or(GENERIC_VOTE_FAILURE)
                .to_string(),
            BallotError::Refresh { .. } => "Your vote was recorded, but your ballot status could not be refreshed. Refresh to see your latest status.".to_string(),
            BallotError::Ineligible { reason } => match reason {
                Some(reason) => format!("You are not eligible to vote in this election: {reason}"),
                None => "You are not eligible to vote in this election".to_string(),
            },
            BallotError::AlreadyVoted(_) => "You have already voted for this position".to_string(),
            BallotError::UnknownCandidate { .. } => "That candidate is not on this ballot".to_string(),
            BallotError::StaleEligibility => "Your ballot status is out of date. Refresh before voting again.".to_string(),
            BallotError::TooManyChoices { .. } => "Please select only one candidate".to_string(),
            BallotError::UnknownPosition(name) => format!("There is no position named {name} on this ballot"),
            BallotError::PositionRequired(positions) => {
                format!("Choose a position to vote for: {}", positions.join(", "))
            }
            BallotError::Service(source) => source
                .server_message()
                .unwrap_or("Failed to load the ballot")
                .to_string(),
        }
    }

    /// True when the votes reached the server even though an error is reported.
    pub fn vote_recorded(&self) -> bool {
        matches!(self, BallotError::Refresh { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}
