mod cast;
mod status;

use clap::Subcommand;
use std::sync::Arc;

use crate::api::BallotApi;

pub use cast::handle_cast_command;
pub use status::{handle_status_command, render_ballot};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the ballot and which positions you have already voted for.
    Status {
        /// Election to show.
        election_id: String,
    },
    /// Cast your vote for one position.
    Cast {
        /// Election to vote in.
        election_id: String,

        /// Position to vote for. Leave out for elections without positions.
        #[arg(short, long)]
        position: Option<String>,

        /// Candidate ids. For ranked choice, list them in order of preference.
        #[arg(required = true)]
        candidates: Vec<String>,
    },
}

pub async fn handle_command<A: BallotApi>(
    api: Arc<A>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match command {
        Command::Status { election_id } => handle_status_command(api, &election_id).await?,
        Command::Cast {
            election_id,
            position,
            candidates,
        } => handle_cast_command(api, &election_id, position.as_deref(), &candidates).await?,
    }
    Ok(())
}
