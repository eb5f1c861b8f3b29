//! Command-line commands and their handlers

use anyhow::Result;
use api::models::{CenterFilters, DonorFilters, RequestFilters};
use api::{ContactForm, Filters, LoginCredentials, RegisterRequest};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde_json::{Value, json};

use crate::notice::Notice;
use crate::state::AppState;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show whether a session exists and who is signed in
    Status,
    /// Sign in and restore the pending redirect
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Path to continue with after signing in
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Create an account
    Register(RegisterArgs),
    /// End the session
    Logout,
    /// Refresh the signed-in user's profile from the backend
    Whoami,
    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Search donors
    Donors {
        #[arg(long)]
        blood_type: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// List blood requests
    Requests(RequestArgs),
    /// Blood requests created by the signed-in user
    MyRequests,
    /// Donations of the signed-in user
    Donations,
    /// List donation centers
    Centers {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        time_slot: Option<String>,
    },
    /// Donation centers near the user
    Nearby {
        #[arg(long)]
        distance: Option<u32>,
    },
    /// Free appointment slots of a center on a day (YYYY-MM-DD)
    Slots { center_id: String, date: NaiveDate },
    /// Cities with donation centers
    Cities,
    /// Appointments of the signed-in user
    Appointments,
    /// Cancel an appointment
    CancelAppointment { id: String },
    /// Volunteer as a donor for a blood request
    Volunteer { request_id: String },
    /// Send the contact form
    Contact(ContactArgs),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    blood_type: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    #[arg(long)]
    blood_type: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    urgency: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    subject: String,
    #[arg(long)]
    message: String,
}

/// Outcome of a command: data to print, a notice, or both
#[derive(Debug, Default)]
pub struct Outcome {
    pub data: Option<Value>,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            notice: None,
        }
    }

    fn notice(notice: Notice) -> Self {
        Self {
            data: None,
            notice: Some(notice),
        }
    }
}

/// Run one command against the application state
pub async fn run(state: &AppState, command: Command) -> Result<Outcome> {
    let outcome = match command {
        Command::Status => {
            let status = state.sessions.status();
            Outcome::data(json!({
                "server": state.config.base_url,
                "authenticated": status.authenticated,
                "displayName": status.display_name,
            }))
        }
        Command::Login {
            email,
            password,
            redirect,
        } => {
            if let Some(path) = redirect {
                state.redirect.remember(&path)?;
            }

            let response = state
                .sessions
                .login(&LoginCredentials { email, password })
                .await?;

            // The pending redirect is only consumed by a login that started a session
            if !state.sessions.is_authenticated() {
                return Ok(Outcome {
                    data: Some(response),
                    notice: Some(Notice::warning("Login did not start a session")),
                });
            }

            let destination = state.redirect.redirect_after_login();
            Outcome {
                data: Some(json!({ "redirect": destination })),
                notice: Some(Notice::success("Login successful")),
            }
        }
        Command::Register(args) => {
            let request = RegisterRequest {
                name: args.name,
                email: args.email,
                password: args.password,
                blood_type: args.blood_type,
                location: args.location,
                phone: args.phone,
            };
            state.sessions.register(&request).await?;
            Outcome::notice(Notice::success("Registration successful"))
        }
        Command::Logout => {
            state.sessions.logout();
            Outcome::notice(Notice::info("You have been logged out"))
        }
        Command::Whoami => match state.sessions.fetch_current_user().await? {
            Some(user) => Outcome::data(serde_json::to_value(user)?),
            None => Outcome::notice(Notice::warning("Not signed in")),
        },
        Command::ForgotPassword { email } => {
            Outcome::data(state.sessions.forgot_password(&email).await?)
        }
        Command::Donors {
            blood_type,
            location,
        } => {
            let filters = Filters::from_serialize(&DonorFilters {
                blood_type,
                location,
            })?;
            Outcome::data(state.api.users.get_donors(&filters).await?)
        }
        Command::Requests(args) => {
            let filters = Filters::from_serialize(&RequestFilters {
                blood_type: args.blood_type,
                status: args.status,
                urgency: args.urgency,
                location: args.location,
                limit: args.limit,
            })?;
            Outcome::data(state.api.requests.get_all_requests(&filters).await?)
        }
        Command::MyRequests => Outcome::data(state.api.requests.get_my_requests().await?),
        Command::Donations => Outcome::data(state.api.donations.get_my_donations().await?),
        Command::Centers {
            city,
            date,
            time_slot,
        } => {
            let filters = Filters::from_serialize(&CenterFilters {
                city,
                date: date.map(|d| d.format("%Y-%m-%d").to_string()),
                time_slot,
            })?;
            Outcome::data(state.api.centers.get_all_centers(&filters).await?)
        }
        Command::Nearby { distance } => Outcome::data(
            state
                .api
                .centers
                .get_nearby_donation_centers(distance)
                .await?,
        ),
        Command::Slots { center_id, date } => Outcome::data(
            state
                .api
                .centers
                .get_available_slots(&center_id, date)
                .await?,
        ),
        Command::Cities => Outcome::data(state.api.centers.get_all_cities().await?),
        Command::Appointments => {
            Outcome::data(state.api.centers.get_user_appointments().await?)
        }
        Command::CancelAppointment { id } => {
            state.api.centers.cancel_appointment(&id).await?;
            Outcome::notice(Notice::success("Appointment cancelled"))
        }
        Command::Volunteer { request_id } => {
            let current_path = format!("/requests.html?id={}", request_id);
            if !state.redirect.require_auth(&current_path) {
                // No login page in the terminal to pick up the redirect parameter
                state.redirect.remember(&current_path)?;
                return Ok(Outcome::notice(Notice::warning(
                    "Please log in to volunteer for a request",
                )));
            }
            Outcome::data(state.api.matching.volunteer_for_request(&request_id).await?)
        }
        Command::Contact(args) => {
            let form = ContactForm {
                name: args.name,
                email: args.email,
                subject: args.subject,
                message: args.message,
            };
            state.api.contact.submit_contact_form(&form).await?;
            Outcome::notice(Notice::success(
                "Your message has been sent successfully!",
            ))
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::persisted::LOGIN_REDIRECT_KEY;
    use common::{ClientConfig, FileStore, KeyValueStore};
    use std::path::{Path, PathBuf};
    use stub_backend::StubServer;
    use tokio_test::assert_ok;

    use crate::notice::Severity;

    const LOGIN_RESPONSE: &str =
        r#"{"token":"jwt-abc","user":{"id":7,"name":"Esi","email":"esi@example.com"}}"#;

    async fn setup() -> (StubServer, AppState, PathBuf) {
        let server = StubServer::start().await;
        let path = std::env::temp_dir()
            .join(format!("lifeblood-app-{}", uuid::Uuid::new_v4()))
            .join("session.json");
        let config = ClientConfig {
            base_url: server.base_url.clone(),
            storage_path: path.to_string_lossy().into_owned(),
            ..ClientConfig::default()
        };
        let state = AppState::new(config).unwrap();
        (server, state, path)
    }

    fn login(redirect: Option<&str>) -> Command {
        Command::Login {
            email: "esi@example.com".to_string(),
            password: "pa55word".to_string(),
            redirect: redirect.map(str::to_string),
        }
    }

    fn stored_redirect(path: &Path) -> Option<String> {
        FileStore::open(path).unwrap().get(LOGIN_REDIRECT_KEY).unwrap()
    }

    fn cleanup(path: &Path) {
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_anonymous_volunteer_resumes_after_login() {
        let (server, state, path) = setup().await;

        let outcome = assert_ok!(
            run(&state, Command::Volunteer {
                request_id: "r7".to_string()
            })
            .await
        );
        assert_eq!(outcome.notice.unwrap().severity, Severity::Warning);
        assert!(server.calls().is_empty());
        assert_eq!(stored_redirect(&path).as_deref(), Some("/requests.html?id=r7"));

        server.respond("POST", "/api/auth/login", 200, LOGIN_RESPONSE);
        let outcome = assert_ok!(run(&state, login(None)).await);
        assert_eq!(
            outcome.data,
            Some(json!({ "redirect": "/requests.html?id=r7" }))
        );
        assert_eq!(stored_redirect(&path), None);

        cleanup(&path);
    }

    #[tokio::test]
    async fn test_login_without_session_keeps_pending_redirect() {
        let (server, state, path) = setup().await;
        server.respond(
            "POST",
            "/api/auth/login",
            200,
            r#"{"message":"Verify your email first"}"#,
        );

        let outcome = assert_ok!(run(&state, login(Some("/donate.html"))).await);
        assert_eq!(outcome.notice.unwrap().severity, Severity::Warning);
        assert_eq!(stored_redirect(&path).as_deref(), Some("/donate.html"));

        server.respond("POST", "/api/auth/login", 200, LOGIN_RESPONSE);
        let outcome = assert_ok!(run(&state, login(None)).await);
        assert_eq!(outcome.data, Some(json!({ "redirect": "/donate.html" })));

        server.respond(
            "GET",
            "/api/auth/me",
            200,
            r#"{"user":{"id":7,"name":"Esi","email":"esi@example.com"}}"#,
        );
        let outcome = assert_ok!(run(&state, Command::Whoami).await);
        assert_eq!(
            outcome.data,
            Some(json!({"id": 7, "name": "Esi", "email": "esi@example.com"}))
        );

        cleanup(&path);
    }
}
