//! Donor matching resource

use serde_json::Value;

use crate::error::ClientResult;
use crate::http::HttpClient;

const MATCH: &str = "/api/match";
const VOLUNTEER: &str = "/api/match/volunteer";

/// Client for matching donors to blood requests
#[derive(Debug, Clone)]
pub struct MatchClient {
    http: HttpClient,
}

impl MatchClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Find donors compatible with a request
    pub async fn find_matching_donors(&self, request_id: &str) -> ClientResult<Value> {
        self.http
            .post_empty(&format!("{}/{}", MATCH, request_id))
            .await
    }

    /// Volunteer the current user as a donor for a request
    pub async fn volunteer_for_request(&self, request_id: &str) -> ClientResult<Value> {
        self.http
            .post_empty(&format!("{}/{}", VOLUNTEER, request_id))
            .await
    }
}
