//! Resource clients, one per REST resource
//!
//! Each client holds a shared [`HttpClient`] plus its endpoint paths and
//! filter-key enumerations as plain data.

use crate::http::HttpClient;

pub mod centers;
pub mod contact;
pub mod donations;
pub mod matching;
pub mod requests;
pub mod users;

pub use centers::DonationCentersClient;
pub use contact::ContactClient;
pub use donations::DonationsClient;
pub use matching::MatchClient;
pub use requests::RequestsClient;
pub use users::UsersClient;

/// All resource clients, sharing one HTTP client
#[derive(Debug, Clone)]
pub struct Api {
    pub users: UsersClient,
    pub requests: RequestsClient,
    pub donations: DonationsClient,
    pub matching: MatchClient,
    pub contact: ContactClient,
    pub centers: DonationCentersClient,
}

impl Api {
    /// Create every resource client around the same HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self {
            users: UsersClient::new(http.clone()),
            requests: RequestsClient::new(http.clone()),
            donations: DonationsClient::new(http.clone()),
            matching: MatchClient::new(http.clone()),
            contact: ContactClient::new(http.clone()),
            centers: DonationCentersClient::new(http),
        }
    }
}
