//! HTTP client for the droplet provider's v1 API

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use tugboat_api::{
    requests::{CreateDropletRequest, ImageFilter, SnapshotRequest},
    responses::{
        Droplet, DropletResponse, DropletsResponse, EventResponse, Image, ImagesResponse,
        NewDroplet, NewDropletResponse, SshKey, SshKeysResponse, StatusResponse,
    },
};

use crate::error::{ClientError, Result};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API credentials, sent as query parameters on every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// HTTP client for communicating with the provider API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl HttpClient {
    /// Create a new HTTP client with the default timeout
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the TLS backend fails to initialize.
    ///
    /// # Example
    /// ```no_run
    /// use tugboat_client::{Credentials, HttpClient};
    ///
    /// let client = HttpClient::new(
    ///     "https://api.digitalocean.com/",
    ///     Credentials::new("client-id", "api-key"),
    /// )?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>, credentials: Credentials) -> Result<Self> {
        Self::with_timeout(base_url, credentials, DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom per-request timeout
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the TLS backend fails to initialize.
    pub fn with_timeout(
        base_url: impl AsRef<str>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, credentials, client)
    }

    /// Create a new HTTP client with custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(
        base_url: impl AsRef<str>,
        credentials: Credentials,
        client: Client,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // `Url::join` drops the last segment unless the base ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL from a path, credentials and extra query parameters
    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.credentials.client_id);
            query.append_pair("api_key", &self.credentials.api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Perform a GET request and interpret the v1 status envelope
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = self.url(path, params)?;
        debug!(path = %path, "sending API request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::transport)?;
        debug!(path = %path, status = status.as_u16(), "API response received");

        decode_response(status.as_u16(), status.is_success(), &body)
    }

    // Droplet endpoints

    /// List all droplets on the account
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    ///
    /// # Example
    /// ```no_run
    /// # use tugboat_client::{Credentials, HttpClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("https://api.digitalocean.com/", Credentials::new("id", "key"))?;
    /// for droplet in client.list_droplets().await? {
    ///     println!("{} ({})", droplet.name, droplet.status);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        let response: DropletsResponse = self.get("droplets/", &[]).await?;
        Ok(response.droplets)
    }

    /// Get a single droplet by id
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn show_droplet(&self, id: u64) -> Result<Droplet> {
        let response: DropletResponse = self.get(&format!("droplets/{id}"), &[]).await?;
        Ok(response.droplet)
    }

    /// Start building a droplet creation request
    ///
    /// Unset options fall back to the built-in defaults in [`CreateDropletRequest`].
    ///
    /// # Example
    /// ```no_run
    /// # use tugboat_client::{Credentials, HttpClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("https://api.digitalocean.com/", Credentials::new("id", "key"))?;
    /// let droplet = client
    ///     .create_droplet("web-01")
    ///     .size_id(66)
    ///     .region_id(2)
    ///     .ssh_key_ids("1234,5678")
    ///     .send()
    ///     .await?;
    /// println!("queued {}", droplet.id);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn create_droplet(&self, name: impl Into<String>) -> CreateDropletBuilder {
        CreateDropletBuilder::new(self.clone(), name.into())
    }

    /// Submit a fully specified droplet creation request
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn submit_create(&self, request: &CreateDropletRequest) -> Result<NewDroplet> {
        let response: NewDropletResponse =
            self.get("droplets/new", &request.query_pairs()).await?;
        Ok(response.droplet)
    }

    /// Queue a reboot
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn reboot_droplet(&self, id: u64) -> Result<EventResponse> {
        self.get(&format!("droplets/{id}/reboot"), &[]).await
    }

    /// Queue a graceful shutdown
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn shutdown_droplet(&self, id: u64) -> Result<EventResponse> {
        self.get(&format!("droplets/{id}/shutdown"), &[]).await
    }

    /// Queue a hard power off
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn power_off_droplet(&self, id: u64) -> Result<EventResponse> {
        self.get(&format!("droplets/{id}/power_off"), &[]).await
    }

    /// Queue destruction of a droplet
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn destroy_droplet(&self, id: u64) -> Result<EventResponse> {
        self.get(&format!("droplets/{id}/destroy"), &[]).await
    }

    /// Queue a snapshot
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn snapshot_droplet(&self, id: u64, request: &SnapshotRequest) -> Result<EventResponse> {
        self.get(&format!("droplets/{id}/snapshot"), &request.query_pairs())
            .await
    }

    // Image endpoints

    /// List images, either the account's own or the provider's global set
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list_images(&self, filter: ImageFilter) -> Result<Vec<Image>> {
        let response: ImagesResponse = self
            .get("images/", &[("filter", filter.as_str().to_string())])
            .await?;
        Ok(response.images)
    }

    // SSH key endpoints

    /// List SSH keys registered on the account
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let response: SshKeysResponse = self.get("ssh_keys/", &[]).await?;
        Ok(response.ssh_keys)
    }
}

/// Turn a raw response into a payload or an API error
///
/// Non-2xx statuses and `"status": "ERROR"` envelopes both become
/// [`ClientError::Api`]; the server's `error_message` wins over the raw body.
fn decode_response<T: DeserializeOwned>(status: u16, success: bool, body: &str) -> Result<T> {
    if !success {
        let message = serde_json::from_str::<StatusResponse>(body)
            .ok()
            .and_then(|envelope| envelope.error_message)
            .unwrap_or_else(|| body.trim().to_string());
        return Err(ClientError::Api { status, message });
    }

    let envelope: StatusResponse = serde_json::from_str(body)?;
    if envelope.is_error() {
        return Err(ClientError::Api {
            status,
            message: envelope
                .error_message
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    Ok(serde_json::from_str(body)?)
}

/// Builder for droplet creation
#[derive(Debug, Clone)]
pub struct CreateDropletBuilder {
    client: HttpClient,
    name: String,
    size_id: Option<u64>,
    image_id: Option<u64>,
    region_id: Option<u64>,
    ssh_key_ids: Option<String>,
}

impl CreateDropletBuilder {
    fn new(client: HttpClient, name: String) -> Self {
        Self {
            client,
            name,
            size_id: None,
            image_id: None,
            region_id: None,
            ssh_key_ids: None,
        }
    }

    /// Set size id (default: 64)
    #[must_use]
    pub fn size_id(mut self, size_id: u64) -> Self {
        self.size_id = Some(size_id);
        self
    }

    /// Set image id (default: 2676)
    #[must_use]
    pub fn image_id(mut self, image_id: u64) -> Self {
        self.image_id = Some(image_id);
        self
    }

    /// Set region id (default: 1)
    #[must_use]
    pub fn region_id(mut self, region_id: u64) -> Self {
        self.region_id = Some(region_id);
        self
    }

    /// Comma separated SSH key ids
    #[must_use]
    pub fn ssh_key_ids(mut self, ids: impl Into<String>) -> Self {
        self.ssh_key_ids = Some(ids.into());
        self
    }

    /// Resolve defaults into a concrete request
    #[must_use]
    pub fn build(&self) -> CreateDropletRequest {
        CreateDropletRequest {
            name: self.name.clone(),
            size_id: self.size_id.unwrap_or(CreateDropletRequest::DEFAULT_SIZE_ID),
            image_id: self.image_id.unwrap_or(CreateDropletRequest::DEFAULT_IMAGE_ID),
            region_id: self
                .region_id
                .unwrap_or(CreateDropletRequest::DEFAULT_REGION_ID),
            ssh_key_ids: self.ssh_key_ids.clone(),
        }
    }

    /// Execute the request
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn send(self) -> Result<NewDroplet> {
        let request = self.build();
        self.client.submit_create(&request).await
    }
}
