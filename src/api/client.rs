use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{CandidateService, ElectionService, EligibilityService, VoteService};
use crate::config::ApiConfig;
use crate::error::ServiceError;
use crate::models::{Candidate, Election, Vote, VoteCreate, VoterEligibility};

pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn election_url(&self, election_id: &str, suffix: &str) -> String {
        format!("{}/elections/{}{}", self.config.base_url, election_id, suffix)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ServiceError> {
        debug!("GET {}", url);
        let response = self.authorized(self.http.get(&url)).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl ElectionService for ApiClient {
    async fn get_election(&self, election_id: &str) -> Result<Election, ServiceError> {
        self.get_json(self.election_url(election_id, "")).await
    }
}

#[async_trait]
impl CandidateService for ApiClient {
    async fn get_candidates(&self, election_id: &str) -> Result<Vec<Candidate>, ServiceError> {
        self.get_json(self.election_url(election_id, "/candidates")).await
    }
}

#[async_trait]
impl EligibilityService for ApiClient {
    async fn check_eligibility(&self, election_id: &str) -> Result<VoterEligibility, ServiceError> {
        self.get_json(self.election_url(election_id, "/eligibility")).await
    }
}

#[async_trait]
impl VoteService for ApiClient {
    async fn cast_vote(&self, election_id: &str, vote: &VoteCreate) -> Result<Vote, ServiceError> {
        let url = self.election_url(election_id, "/vote");
        debug!("POST {} candidate={}", url, vote.candidate_id);
        let response = self.authorized(self.http.post(&url)).json(vote).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = error_message(&body);
        warn!("Request failed with {}: {}", status, message.as_deref().unwrap_or("<no message>"));
        return Err(ServiceError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Pull the human-readable error text out of an error body. The API uses
/// `{"detail": "..."}`; some proxies answer with `{"message": "..."}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["detail", "message"]
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(|v| v.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
