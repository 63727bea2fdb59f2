//! Response types for the API
//!
//! Every v1 response carries a `status` of `OK` or `ERROR`. The envelope is
//! decoded first; the payload types below are decoded only for `OK` replies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERROR")]
    Error,
}

/// Status envelope shared by all responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ApiStatus,
    #[serde(default, alias = "message")]
    pub error_message: Option<String>,
}

impl StatusResponse {
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ApiStatus::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    pub image_id: u64,
    pub size_id: u64,
    pub region_id: u64,
    #[serde(default)]
    pub backups_active: Option<bool>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub private_ip_address: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Droplet {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropletsResponse {
    pub droplets: Vec<Droplet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropletResponse {
    pub droplet: Droplet,
}

/// Droplet record returned by a create call, before it has an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDroplet {
    pub id: u64,
    pub name: String,
    pub image_id: u64,
    pub size_id: u64,
    #[serde(default)]
    pub event_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDropletResponse {
    pub droplet: NewDroplet,
}

/// Reply to actions that queue an event (reboot, shutdown, destroy, snapshot)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventResponse {
    #[serde(default)]
    pub event_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub distribution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKeysResponse {
    pub ssh_keys: Vec<SshKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope() {
        let body = r#"{"status":"ERROR","error_message":"Access Denied"}"#;
        let envelope: StatusResponse = serde_json::from_str(body).unwrap();

        assert!(envelope.is_error());
        assert_eq!(envelope.error_message.as_deref(), Some("Access Denied"));
    }

    #[test]
    fn test_error_envelope_message_alias() {
        let body = r#"{"status":"ERROR","message":"not found"}"#;
        let envelope: StatusResponse = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.error_message.as_deref(), Some("not found"));
    }

    #[test]
    fn test_droplet_with_null_fields() {
        let body = r#"{
            "status": "OK",
            "droplets": [{
                "id": 100823,
                "name": "test222",
                "image_id": 420,
                "size_id": 33,
                "region_id": 1,
                "backups_active": null,
                "ip_address": null,
                "status": "new",
                "locked": true
            }]
        }"#;
        let response: DropletsResponse = serde_json::from_str(body).unwrap();
        let droplet = &response.droplets[0];

        assert_eq!(droplet.id, 100_823);
        assert_eq!(droplet.ip_address, None);
        assert_eq!(droplet.backups_active, None);
        assert!(!droplet.is_active());
    }

    #[test]
    fn test_new_droplet() {
        let body = r#"{
            "status": "OK",
            "droplet": {"id": 100824, "name": "foo", "image_id": 419, "size_id": 32, "event_id": 7499}
        }"#;
        let response: NewDropletResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.droplet.event_id, Some(7499));
    }

    #[test]
    fn test_images_without_distribution() {
        let body = r#"{"status":"OK","images":[{"id":1,"name":"My Snapshot","distribution":null}]}"#;
        let response: ImagesResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.images[0].distribution, None);
    }
}
