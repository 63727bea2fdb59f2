//! tugboat-client: HTTP client library
//!
//! Talks to the droplet provider's v1 API. Every call is a `GET` with the
//! account credentials in the query string; responses carry a `status`
//! envelope that is checked before the payload is decoded.
//!
//! # Example
//!
//! ```no_run
//! use tugboat_client::{Credentials, HttpClient};
//! use tugboat_api::requests::ImageFilter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(
//!     "https://api.digitalocean.com/",
//!     Credentials::new("client-id", "api-key"),
//! )?;
//!
//! // List droplets
//! let droplets = client.list_droplets().await?;
//!
//! // Queue a reboot of the first one
//! if let Some(droplet) = droplets.first() {
//!     client.reboot_droplet(droplet.id).await?;
//! }
//!
//! // Global images
//! let images = client.list_images(ImageFilter::Global).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;

pub use error::{ClientError, Result};
pub use http::{CreateDropletBuilder, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpClient};
