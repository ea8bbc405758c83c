use log::{error, info, warn};
use std::sync::Arc;

use crate::api::BallotApi;
use crate::ballot::SubmitReceipt;
use crate::ballot::session::BallotSession;
use crate::error::BallotError;
use crate::models::PositionKey;

pub async fn handle_cast_command<A: BallotApi>(
    api: Arc<A>,
    election_id: &str,
    position: Option<&str>,
    candidates: &[String],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut session = BallotSession::load(api, election_id).await?;
    let position = resolve_position(&session, position)?;

    match cast_ballot(&mut session, &position, candidates).await {
        Ok(receipt) => {
            println!("Your vote has been recorded ({} vote(s)).", receipt.votes.len());
            let remaining = &receipt.eligibility.positions_remaining;
            if !remaining.is_empty() {
                println!("Positions still open to you: {}", remaining.join(", "));
            }
            Ok(())
        }
        Err(err) if err.vote_recorded() => {
            warn!("Vote for {} recorded without a fresh eligibility snapshot: {}", position, err);
            println!("{}", err.user_message());
            Ok(())
        }
        Err(err) => {
            error!("Casting vote for {} failed: {}", position, err);
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}

/// Enter `candidates` as the selection for `position`, in the given order,
/// and submit it.
pub async fn cast_ballot<A: BallotApi>(
    session: &mut BallotSession<A>,
    position: &PositionKey,
    candidates: &[String],
) -> Result<SubmitReceipt, BallotError> {
    if session.election().voting_method.is_single_choice() && candidates.len() > 1 {
        return Err(BallotError::TooManyChoices {
            method: session.election().voting_method,
            given: candidates.len(),
        });
    }

    for candidate_id in candidates {
        if session.selections().is_selected(position, candidate_id) {
            // Toggling again would undo the pick.
            continue;
        }
        session.toggle(position, candidate_id)?;
    }

    info!("Submitting {} choice(s) for {}", candidates.len(), position);
    session.submit(position).await
}

fn resolve_position<A: BallotApi>(
    session: &BallotSession<A>,
    requested: Option<&str>,
) -> Result<PositionKey, BallotError> {
    let positions = session.positions();
    match requested {
        Some(token) => {
            let position = PositionKey::from_token(token);
            if positions.contains(&position) {
                Ok(position)
            } else {
                Err(BallotError::UnknownPosition(token.to_string()))
            }
        }
        None if positions.len() == 1 => Ok(positions[0].clone()),
        None => Err(BallotError::PositionRequired(
            positions.iter().map(PositionKey::to_string).collect(),
        )),
    }
}
