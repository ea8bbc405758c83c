use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Token used by the ballot UI for elections without named positions.
pub const DEFAULT_POSITION: &str = "_default";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Election {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub voting_method: VotingMethod,
    #[serde(default)]
    pub victory_condition: Option<String>,
    #[serde(default)]
    pub runoff_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub positions: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingMethod {
    SimpleMajority,
    Supermajority,
    RankedChoice,
    Approval,
}

impl VotingMethod {
    /// Simple majority and supermajority both take exactly one candidate per position.
    pub fn is_single_choice(&self) -> bool {
        matches!(self, VotingMethod::SimpleMajority | VotingMethod::Supermajority)
    }

    pub fn label(&self) -> &'static str {
        match self {
            VotingMethod::SimpleMajority => "Simple Majority",
            VotingMethod::Supermajority => "Supermajority",
            VotingMethod::RankedChoice => "Ranked Choice",
            VotingMethod::Approval => "Approval",
        }
    }
}

impl fmt::Display for VotingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub election_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub accepted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoterEligibility {
    pub is_eligible: bool,
    #[serde(default)]
    pub has_voted: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub positions_voted: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub positions_remaining: Vec<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl VoterEligibility {
    /// Positions reported as both voted and remaining. A well-formed snapshot has none.
    pub fn overlapping_positions(&self) -> Vec<&str> {
        self.positions_voted
            .iter()
            .filter(|p| self.positions_remaining.contains(p))
            .map(String::as_str)
            .collect()
    }
}

/// One candidate-vote as accepted by the vote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCreate {
    pub election_id: String,
    pub candidate_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_rank: Option<u32>,
}

/// A vote as persisted by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    pub election_id: String,
    pub candidate_id: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub vote_rank: Option<u32>,
    #[serde(default)]
    pub voted_at: Option<DateTime<Utc>>,
}

/// A ballot position. Elections without named positions use the implicit default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PositionKey {
    Default,
    Named(String),
}

impl PositionKey {
    pub fn from_token(token: &str) -> Self {
        if token == DEFAULT_POSITION {
            PositionKey::Default
        } else {
            PositionKey::Named(token.to_string())
        }
    }

    /// The position as sent to the vote endpoint; the default position is omitted.
    pub fn wire(&self) -> Option<&str> {
        match self {
            PositionKey::Default => None,
            PositionKey::Named(name) => Some(name),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            PositionKey::Default => DEFAULT_POSITION,
            PositionKey::Named(name) => name,
        }
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<&str> for PositionKey {
    fn from(token: &str) -> Self {
        PositionKey::from_token(token)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn election_positions_accept_null_and_missing() {
        let with_null: Election = serde_json::from_str(
            r#"{"id":"e1","title":"Officers","voting_method":"ranked_choice","positions":null}"#,
        )
        .unwrap();
        assert!(with_null.positions.is_empty());
        assert_eq!(with_null.voting_method, VotingMethod::RankedChoice);

        let missing: Election = serde_json::from_str(
            r#"{"id":"e1","title":"Officers","voting_method":"approval"}"#,
        )
        .unwrap();
        assert!(missing.positions.is_empty());
    }

    #[test]
    fn vote_create_omits_absent_fields() {
        let vote = VoteCreate {
            election_id: "e1".to_string(),
            candidate_id: "c1".to_string(),
            position: None,
            vote_rank: None,
        };
        let json = serde_json::to_value(&vote).unwrap();
        assert_eq!(json, serde_json::json!({"election_id": "e1", "candidate_id": "c1"}));
    }

    #[test]
    fn default_token_has_no_wire_position() {
        assert_eq!(PositionKey::from_token("_default"), PositionKey::Default);
        assert_eq!(PositionKey::Default.wire(), None);
        assert_eq!(PositionKey::from("Chief").wire(), Some("Chief"));
    }

    #[test]
    fn overlapping_positions_reports_partition_violations() {
        let eligibility = VoterEligibility {
            is_eligible: true,
            positions_voted: vec!["Chief".to_string(), "Captain".to_string()],
            positions_remaining: vec!["Captain".to_string(), "Secretary".to_string()],
            ..Default::default()
        };
        assert_eq!(eligibility.overlapping_positions(), vec!["Captain"]);
    }
}
