use crate::error::ValidationError;
use crate::models::VoteCreate;
use crate::voting::Selection;

/// Flip one candidate in or out of the approved set.
pub fn toggle(current: Option<Selection>, candidate_id: &str) -> Option<Selection> {
    // A selection of another shape is replaced, not merged
    let mut approved = match current {
        Some(Selection::Approved(ids)) => ids,
        _ => Vec::new(),
    };

    if approved.iter().any(|id| id == candidate_id) {
        approved.retain(|id| id != candidate_id);
    } else {
        approved.push(candidate_id.to_string());
    }

    Some(Selection::Approved(approved))
}

/// One unranked record per approved candidate.
pub fn build_votes(
    election_id: &str,
    position: Option<&str>,
    selection: Option<&Selection>,
) -> Result<Vec<VoteCreate>, ValidationError> {
    let approved = match selection {
        Some(Selection::Approved(ids)) if !ids.is_empty() => ids,
        _ => return Err(ValidationError::NothingApproved),
    };

    Ok(approved
        .iter()
        .map(|candidate_id| VoteCreate {
            election_id: election_id.to_string(),
            candidate_id: candidate_id.clone(),
            position: position.map(str::to_string),
            vote_rank: None,
        })
        .collect())
}
