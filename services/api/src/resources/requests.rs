//! Blood requests resource

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::query::{Filters, with_filters};

const REQUESTS: &str = "/api/requests";
const MY_REQUESTS: &str = "/api/requests/user/me";

/// Filter keys recognized by the request listing, in query order
pub const REQUEST_FILTERS: &[&str] = &["bloodType", "status", "urgency", "location", "limit"];

/// Client for blood requests
#[derive(Debug, Clone)]
pub struct RequestsClient {
    http: HttpClient,
}

impl RequestsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Create a new blood request
    pub async fn create_request<B>(&self, data: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.http.post(REQUESTS, data).await
    }

    /// List blood requests
    pub async fn get_all_requests(&self, filters: &Filters) -> ClientResult<Value> {
        self.http
            .get(&with_filters(REQUESTS, REQUEST_FILTERS, filters))
            .await
    }

    /// Get a request by ID
    pub async fn get_request_by_id(&self, id: &str) -> ClientResult<Value> {
        self.http.get(&format!("{}/{}", REQUESTS, id)).await
    }

    /// Requests created by the current user
    pub async fn get_my_requests(&self) -> ClientResult<Value> {
        self.http.get(MY_REQUESTS).await
    }

    /// Update a request
    pub async fn update_request<B>(&self, id: &str, data: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.http.put(&format!("{}/{}", REQUESTS, id), data).await
    }

    /// Delete a request
    pub async fn delete_request(&self, id: &str) -> ClientResult<Value> {
        self.http.delete(&format!("{}/{}", REQUESTS, id)).await
    }
}
