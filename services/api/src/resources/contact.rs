//! Contact resource
//!
//! Submissions are checked locally first: without a session token or with an
//! empty field the call fails with [`ClientError::Validation`] and nothing is
//! sent.

use serde_json::Value;
use tracing::error;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::models::ContactForm;
use crate::validation::{validate_contact_form, validate_token};

const CONTACT: &str = "/api/contact";

/// Client for the contact form
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: HttpClient,
}

impl ContactClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Submit the contact form
    pub async fn submit_contact_form(&self, form: &ContactForm) -> ClientResult<Value> {
        let token = self.http.token();
        validate_token(
            token.as_deref(),
            "Authentication required to submit contact form",
        )
        .and_then(|_| validate_contact_form(form))
        .map_err(|message| {
            error!("Error submitting contact form: {}", message);
            ClientError::Validation(message)
        })?;

        self.http.post(CONTACT, form).await
    }

    /// Contact form submissions (admin users)
    pub async fn get_contact_submissions(&self) -> ClientResult<Value> {
        let token = self.http.token();
        validate_token(token.as_deref(), "Authentication required").map_err(|message| {
            error!("Error fetching contact submissions: {}", message);
            ClientError::Validation(message)
        })?;

        self.http.get(CONTACT).await
    }
}
