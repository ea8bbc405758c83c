use crate::error::ValidationError;
use crate::models::VoteCreate;
use crate::voting::Selection;

// Picking the current choice again clears it, like a radio button that can be unset.
pub fn toggle(current: Option<Selection>, candidate_id: &str) -> Option<Selection> {
    match current {
        Some(Selection::Single(id)) if id == candidate_id => None,
        _ => Some(Selection::Single(candidate_id.to_string())),
    }
}

pub fn build_votes(
    election_id: &str,
    position: Option<&str>,
    selection: Option<&Selection>,
) -> Result<Vec<VoteCreate>, ValidationError> {
    let candidate_id = match selection {
        Some(Selection::Single(id)) if !id.is_empty() => id,
        _ => return Err(ValidationError::NoCandidateSelected),
    };

    // Exactly one record, never ranked
    Ok(vec![VoteCreate {
        election_id: election_id.to_string(),
        candidate_id: candidate_id.clone(),
        position: position.map(str::to_string),
        vote_rank: None,
    }])
}
