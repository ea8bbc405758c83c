use crate::error::ValidationError;
use crate::models::VoteCreate;
use crate::voting::Selection;

/// Unranked candidates go to the back of the list; ranked ones are removed
/// and everyone below them moves up a rank.
pub fn toggle(current: Option<Selection>, candidate_id: &str) -> Option<Selection> {
    // A selection of another shape is replaced, not merged
    let mut ranking = match current {
        Some(Selection::Ranked(ids)) => ids,
        _ => Vec::new(),
    };

    if let Some(index) = ranking.iter().position(|id| id == candidate_id) {
        // remove() shifts the tail, which is the re-rank
        ranking.remove(index);
    } else {
        ranking.push(candidate_id.to_string());
    }

    Some(Selection::Ranked(ranking))
}

pub fn rank_of(ranking: &[String], candidate_id: &str) -> Option<u32> {
    ranking
        .iter()
        .position(|id| id == candidate_id)
        .map(|index| index as u32 + 1)
}

/// One record per ranked candidate, in the voter's order, ranks starting at 1.
/// The server's elimination rounds read these ranks, so order must not change.
pub fn build_votes(
    election_id: &str,
    position: Option<&str>,
    selection: Option<&Selection>,
) -> Result<Vec<VoteCreate>, ValidationError> {
    let ranking = match selection {
        Some(Selection::Ranked(ids)) if !ids.is_empty() => ids,
        _ => return Err(ValidationError::NothingRanked),
    };

    Ok(ranking
        .iter()
        .enumerate()
        .map(|(index, candidate_id)| VoteCreate {
            election_id: election_id.to_string(),
            candidate_id: candidate_id.clone(),
            position: position.map(str::to_string),
            vote_rank: Some(index as u32 + 1),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: &[&str]) -> Selection {
        Selection::Ranked(ids.iter().map(|id| id.to_string()).collect())
    }

    #[test]
    fn requires_at_least_one_rank() {
        assert_eq!(
            build_votes("e1", None, Some(&ranked(&[]))),
            Err(ValidationError::NothingRanked)
        );
        assert_eq!(build_votes("e1", None, None), Err(ValidationError::NothingRanked));
    }

    #[test]
    fn keeps_voter_order_not_id_order() {
        let votes = build_votes("e1", Some("Chief"), Some(&ranked(&["B", "A", "C"]))).unwrap();
        let order: Vec<(&str, Option<u32>)> = votes
            .iter()
            .map(|v| (v.candidate_id.as_str(), v.vote_rank))
            .collect();
        assert_eq!(order, vec![("B", Some(1)), ("A", Some(2)), ("C", Some(3))]);
        assert!(votes.iter().all(|v| v.position.as_deref() == Some("Chief")));
    }

    #[test]
    fn toggle_never_duplicates() {
        let once = toggle(None, "a");
        let twice = toggle(once, "b");
        let back = toggle(twice, "a");
        assert_eq!(back, Some(ranked(&["b"])));
    }
}
