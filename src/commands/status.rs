use std::fmt::Write;
use std::sync::Arc;

use crate::api::BallotApi;
use crate::ballot::session::BallotSession;
use crate::models::{PositionKey, VotingMethod};

pub async fn handle_status_command<A: BallotApi>(
    api: Arc<A>,
    election_id: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let session = BallotSession::load(api, election_id).await?;
    print!("{}", render_ballot(&session));
    Ok(())
}

/// Plain-text ballot: one block per position with its candidates, the
/// voter's current picks, and any notice.
pub fn render_ballot<A: BallotApi>(session: &BallotSession<A>) -> String {
    let election = session.election();
    let method = election.voting_method;
    let mut out = String::new();

    let _ = writeln!(out, "**{}**\n{} Voting", election.title, method);
    if !session.eligibility().is_eligible {
        let reason = session.eligibility().reason.as_deref().unwrap_or("no reason given");
        let _ = writeln!(out, "You are not eligible to vote in this election ({reason}).");
    }
    if session.is_stale() {
        let _ = writeln!(out, "Ballot status is out of date. Refresh before voting again.");
    }

    for ballot in session.ballot_summary() {
        out.push('\n');
        let heading = match &ballot.position {
            PositionKey::Default => "Ballot".to_string(),
            PositionKey::Named(name) => name.clone(),
        };
        if ballot.already_voted {
            let _ = writeln!(out, "{heading}: voted");
            continue;
        }
        let _ = writeln!(out, "{heading}:");

        if ballot.candidates.is_empty() {
            let _ = writeln!(out, "  (no candidates)");
        }
        for candidate in &ballot.candidates {
            let marker = match method {
                VotingMethod::RankedChoice => session
                    .selections()
                    .rank_of(&ballot.position, &candidate.id)
                    .map_or_else(|| "Unranked".to_string(), |rank| format!("#{rank}")),
                _ if session.selections().is_selected(&ballot.position, &candidate.id) => "✓".to_string(),
                _ => " ".to_string(),
            };
            let _ = writeln!(out, "  [{}] {} ({})", marker, candidate.name, candidate.id);
        }
        if let Some(notice) = session.notice(&ballot.position) {
            let _ = writeln!(out, "  ! {notice}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::testing::FakeApi;
    use crate::models::VoterEligibility;

    #[tokio::test]
    async fn renders_voted_and_open_positions() {
        let api = Arc::new(FakeApi::new(
            VotingMethod::RankedChoice,
            &["Chief", "Captain"],
            &[("a", Some("Chief")), ("b", Some("Captain")), ("c", Some("Captain"))],
        ));
        api.set_eligibility(VoterEligibility {
            is_eligible: true,
            positions_voted: vec!["Chief".to_string()],
            positions_remaining: vec!["Captain".to_string()],
            ..Default::default()
        });
        let mut session = BallotSession::load(api, "e1").await.unwrap();
        session.toggle(&PositionKey::from("Captain"), "c").unwrap();

        let text = render_ballot(&session);
        assert!(text.contains("Ranked Choice Voting"));
        assert!(text.contains("Chief: voted"));
        assert!(text.contains("[#1] Candidate c (c)"));
        assert!(text.contains("[Unranked] Candidate b (b)"));
    }

    #[tokio::test]
    async fn default_position_renders_as_single_ballot() {
        let api = Arc::new(FakeApi::new(VotingMethod::SimpleMajority, &[], &[("c1", None)]));
        let session = BallotSession::load(api, "e1").await.unwrap();

        let text = render_ballot(&session);
        assert!(text.contains("Ballot:"));
        assert!(!text.contains("_default"));
    }
}
