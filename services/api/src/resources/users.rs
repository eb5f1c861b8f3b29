//! Users resource

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::query::{Filters, with_filters};

const USERS: &str = "/api/users";
const PROFILE: &str = "/api/users/profile";
const DONORS: &str = "/api/users/donors";

/// Filter keys recognized by the donor listing, in query order
pub const DONOR_FILTERS: &[&str] = &["bloodType", "location"];

/// Client for user profiles and donor search
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: HttpClient,
}

impl UsersClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Get the current user's profile
    pub async fn get_profile(&self) -> ClientResult<Value> {
        self.http.get(PROFILE).await
    }

    /// Update the current user's profile
    pub async fn update_profile<B>(&self, data: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.http.put(PROFILE, data).await
    }

    /// List donors, optionally filtered by blood type and location
    pub async fn get_donors(&self, filters: &Filters) -> ClientResult<Value> {
        self.http
            .get(&with_filters(DONORS, DONOR_FILTERS, filters))
            .await
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: &str) -> ClientResult<Value> {
        self.http.get(&format!("{}/{}", USERS, id)).await
    }
}
