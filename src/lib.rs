//! Ballot casting for the station intranet: per-position selections, vote
//! submission, and eligibility tracking against the intranet API.

pub mod api;
pub mod ballot;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod voting;

pub use ballot::session::BallotSession;
pub use ballot::{BallotSubmissionEngine, SubmitReceipt};
pub use error::{BallotError, ServiceError, ValidationError};
