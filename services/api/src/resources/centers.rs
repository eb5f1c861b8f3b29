//! Donation centers resource
//!
//! Centers, their appointment slots and the current user's appointments.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::query::{Filters, append_query, with_filters};

const CENTERS: &str = "/api/donation-centers";
const NEARBY: &str = "/api/donation-centers/nearby";
const CITIES: &str = "/api/donation-centers/cities";
const APPOINTMENTS: &str = "/api/donation-centers/appointments";
const MY_APPOINTMENTS: &str = "/api/donation-centers/appointments/me";

/// Filter keys recognized by the center listing, in query order
pub const CENTER_FILTERS: &[&str] = &["city", "date", "timeSlot"];

/// Search radius used when the caller gives none
pub const DEFAULT_NEARBY_DISTANCE: u32 = 10;

/// Client for donation centers and appointments
#[derive(Debug, Clone)]
pub struct DonationCentersClient {
    http: HttpClient,
}

impl DonationCentersClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List donation centers, optionally filtered by city, date and time slot
    pub async fn get_all_centers(&self, filters: &Filters) -> ClientResult<Value> {
        self.http
            .get(&with_filters(CENTERS, CENTER_FILTERS, filters))
            .await
            .inspect_err(|e| error!("Error fetching donation centers: {}", e))
    }

    /// Centers within `distance` of the user (default 10)
    pub async fn get_nearby_donation_centers(&self, distance: Option<u32>) -> ClientResult<Value> {
        let distance = distance.unwrap_or(DEFAULT_NEARBY_DISTANCE);
        let path = append_query(NEARBY, [("distance", distance.to_string())]);

        self.http
            .get(&path)
            .await
            .inspect_err(|e| error!("Error fetching nearby donation centers: {}", e))
    }

    pub async fn get_donation_center_by_id(&self, id: &str) -> ClientResult<Value> {
        self.http
            .get(&format!("{}/{}", CENTERS, id))
            .await
            .inspect_err(|e| error!("Error fetching donation center with ID {}: {}", id, e))
    }

    /// Free appointment slots of a center on a given day
    pub async fn get_available_slots(&self, center_id: &str, date: NaiveDate) -> ClientResult<Value> {
        let path = append_query(
            &format!("{}/{}/slots", CENTERS, center_id),
            [("date", date.format("%Y-%m-%d").to_string())],
        );

        self.http.get(&path).await.inspect_err(|e| {
            error!(
                "Error fetching available slots for center {}: {}",
                center_id, e
            )
        })
    }

    /// Book an appointment
    pub async fn book_appointment<B>(&self, data: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.http
            .post(APPOINTMENTS, data)
            .await
            .inspect_err(|e| error!("Error booking appointment: {}", e))
    }

    /// Appointments of the current user
    pub async fn get_user_appointments(&self) -> ClientResult<Value> {
        self.http
            .get(MY_APPOINTMENTS)
            .await
            .inspect_err(|e| error!("Error fetching user appointments: {}", e))
    }

    /// Cancel an appointment
    pub async fn cancel_appointment(&self, id: &str) -> ClientResult<Value> {
        self.http
            .put_empty(&format!("{}/{}/cancel", APPOINTMENTS, id))
            .await
            .inspect_err(|e| error!("Error cancelling appointment with ID {}: {}", id, e))
    }

    /// Cities that have at least one donation center
    pub async fn get_all_cities(&self) -> ClientResult<Value> {
        self.http
            .get(CITIES)
            .await
            .inspect_err(|e| error!("Error fetching cities: {}", e))
    }
}
