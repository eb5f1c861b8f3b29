//! HTTP API client for the Lifeblood blood-donation backend
//!
//! [`HttpClient`] performs authenticated JSON calls against one base URL;
//! the clients in [`resources`] map each REST endpoint to one method.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use api::{Anonymous, Api, Filters, HttpClient};
//! use common::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load()?;
//!     let http = HttpClient::new(&config, Arc::new(Anonymous))?;
//!     let api = Api::new(http);
//!
//!     let requests = api
//!         .requests
//!         .get_all_requests(&Filters::new().with("bloodType", "O-"))
//!         .await?;
//!     println!("{}", requests);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod resources;
pub mod validation;

pub use error::{ClientError, ClientResult};
pub use http::{Anonymous, HttpClient, TokenSource};
pub use models::{ContactForm, LoginCredentials, RegisterRequest, User};
pub use query::Filters;
pub use resources::Api;
