//! Donations resource

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;
use crate::http::HttpClient;

const DONATIONS: &str = "/api/donations";
const MY_DONATIONS: &str = "/api/donations/me";

#[derive(Debug, Clone)]
pub struct DonationsClient {
    http: HttpClient,
}

impl DonationsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Record a new donation
    pub async fn create_donation<B>(&self, data: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.http.post(DONATIONS, data).await
    }

    pub async fn get_my_donations(&self) -> ClientResult<Value> {
        self.http.get(MY_DONATIONS).await
    }

    pub async fn get_donation_by_id(&self, id: &str) -> ClientResult<Value> {
        self.http.get(&format!("{}/{}", DONATIONS, id)).await
    }
}
